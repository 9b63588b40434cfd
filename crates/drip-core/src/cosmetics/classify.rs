//! ============================================================================
//! Classifier - Heuristic tagging of catalog items
//! ============================================================================
//! The catalog has no reliable flag for "universal ornament" or for armor
//! slots, so classification matches substrings of the free-text type label
//! and description. The phrase lists live in `HeuristicVocabulary` so they can
//! be versioned and swapped without touching aggregation.
//!
//! Known limitation: universal detection keys on description wording. If
//! upstream rewords ornament descriptions, items silently reclassify as
//! armor-specific.
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bungie::{InventoryItemDefinition, ITEM_TYPE_ARMOR};
use crate::types::{ArmorSlot, DripError, Result};

pub const DEFAULT_VOCABULARY_VERSION: &str = "2024.1";

/// Slot label substrings, checked in priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotVocabulary {
    pub helmet: Vec<String>,
    pub gauntlets: Vec<String>,
    pub chest: Vec<String>,
    pub legs: Vec<String>,
    pub class_item: Vec<String>,
}

impl SlotVocabulary {
    fn terms(&self, slot: ArmorSlot) -> &[String] {
        match slot {
            ArmorSlot::Helmet => &self.helmet,
            ArmorSlot::Gauntlets => &self.gauntlets,
            ArmorSlot::Chest => &self.chest,
            ArmorSlot::Legs => &self.legs,
            ArmorSlot::ClassItem => &self.class_item,
            ArmorSlot::Unknown => &[],
        }
    }
}

/// Versioned phrase lists driving classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicVocabulary {
    pub version: String,
    pub shader_label: String,
    pub ornament_label: String,
    /// Description phrases marking an ornament as universal (transmog)
    pub universal_phrases: Vec<String>,
    pub slots: SlotVocabulary,
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for HeuristicVocabulary {
    fn default() -> Self {
        Self {
            version: DEFAULT_VOCABULARY_VERSION.to_string(),
            shader_label: "shader".to_string(),
            ornament_label: "ornament".to_string(),
            universal_phrases: terms(&[
                "once you get a universal ornament",
                "once you get the universal ornament",
                "eligible legendary armor",
                "eligible legendary",
            ]),
            slots: SlotVocabulary {
                helmet: terms(&["helmet"]),
                gauntlets: terms(&["gauntlet"]),
                chest: terms(&["chest armor", "robes"]),
                // bare "leg" would also match "legendary"
                legs: terms(&["leg armor", "greaves", "legs"]),
                class_item: terms(&["cloak", "bond", "mark", "class item"]),
            },
        }
    }
}

impl HeuristicVocabulary {
    /// Load a vocabulary from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DripError::Config(format!("Failed to read vocabulary {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let vocabulary: Self = serde_json::from_str(raw)
            .map_err(|e| DripError::Config(format!("Invalid vocabulary: {}", e)))?;
        Ok(vocabulary.normalized())
    }

    /// Lowercase every term so matching is case-insensitive
    fn normalized(mut self) -> Self {
        let lower = |list: &mut Vec<String>| {
            for term in list.iter_mut() {
                *term = term.to_lowercase();
            }
        };
        self.shader_label = self.shader_label.to_lowercase();
        self.ornament_label = self.ornament_label.to_lowercase();
        lower(&mut self.universal_phrases);
        lower(&mut self.slots.helmet);
        lower(&mut self.slots.gauntlets);
        lower(&mut self.slots.chest);
        lower(&mut self.slots.legs);
        lower(&mut self.slots.class_item);
        self
    }
}

/// Pure item classification over a vocabulary
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    vocabulary: HeuristicVocabulary,
}

impl Classifier {
    pub fn new(vocabulary: HeuristicVocabulary) -> Self {
        Self {
            vocabulary: vocabulary.normalized(),
        }
    }

    pub fn vocabulary(&self) -> &HeuristicVocabulary {
        &self.vocabulary
    }

    pub fn is_shader(&self, item: &InventoryItemDefinition) -> bool {
        item.is_plug() && item.type_label().contains(&self.vocabulary.shader_label)
    }

    pub fn is_armor_ornament(&self, item: &InventoryItemDefinition) -> bool {
        item.is_plug() && item.type_label().contains(&self.vocabulary.ornament_label)
    }

    /// Ornament whose description uses the universal (transmog) wording
    pub fn is_universal_ornament(&self, item: &InventoryItemDefinition) -> bool {
        if !self.is_armor_ornament(item) {
            return false;
        }
        let description = item.description();
        self.vocabulary
            .universal_phrases
            .iter()
            .any(|phrase| description.contains(phrase.as_str()))
    }

    pub fn is_armor_piece(&self, item: &InventoryItemDefinition) -> bool {
        item.item_type == ITEM_TYPE_ARMOR || self.infer_slot(item).is_known()
    }

    /// Armor piece that can actually be worn, as opposed to a plug whose
    /// label happens to name a slot ("Helmet Ornament")
    pub fn is_wearable_armor(&self, item: &InventoryItemDefinition) -> bool {
        !item.is_plug() && self.is_armor_piece(item)
    }

    /// First slot in priority order whose vocabulary matches the type label
    pub fn infer_slot(&self, item: &InventoryItemDefinition) -> ArmorSlot {
        let label = item.type_label();
        ArmorSlot::KNOWN
            .into_iter()
            .find(|slot| {
                self.vocabulary
                    .slots
                    .terms(*slot)
                    .iter()
                    .any(|term| label.contains(term.as_str()))
            })
            .unwrap_or(ArmorSlot::Unknown)
    }
}
