//! ============================================================================
//! Report Types - The aggregate drip report
//! ============================================================================
//! Serialized as camelCase JSON for the client.
//! ============================================================================

use serde::{Deserialize, Serialize};

use crate::types::{ArmorSlot, ClassKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedShader {
    pub item_hash: u32,
    pub collectible_hash: u32,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorOrnament {
    pub item_hash: u32,
    pub collectible_hash: u32,
    pub name: String,
    pub icon: String,
    pub class_type: i32,
    /// true = transmog, false = armor-specific
    pub is_universal: bool,
    pub slot: ArmorSlot,
    pub applies_to_item_hashes: Vec<u32>,
    pub applies_to_item_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedArmorItem {
    pub item_hash: u32,
    pub collectible_hash: u32,
    pub name: String,
    pub icon: String,
    pub class_type: i32,
    pub slot: ArmorSlot,
    pub tier_type: i32,
    pub is_exotic: bool,
}

/// One entry per class bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByClass<T> {
    pub hunter: Vec<T>,
    pub titan: Vec<T>,
    pub warlock: Vec<T>,
    pub unknown: Vec<T>,
}

impl<T> Default for ByClass<T> {
    fn default() -> Self {
        Self {
            hunter: Vec::new(),
            titan: Vec::new(),
            warlock: Vec::new(),
            unknown: Vec::new(),
        }
    }
}

impl<T> ByClass<T> {
    pub fn get(&self, class: ClassKey) -> &[T] {
        match class {
            ClassKey::Hunter => &self.hunter,
            ClassKey::Titan => &self.titan,
            ClassKey::Warlock => &self.warlock,
            ClassKey::Unknown => &self.unknown,
        }
    }

    pub fn push(&mut self, class: ClassKey, value: T) {
        match class {
            ClassKey::Hunter => self.hunter.push(value),
            ClassKey::Titan => self.titan.push(value),
            ClassKey::Warlock => self.warlock.push(value),
            ClassKey::Unknown => self.unknown.push(value),
        }
    }

    /// Entries across all four buckets
    pub fn total(&self) -> usize {
        self.hunter.len() + self.titan.len() + self.warlock.len() + self.unknown.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassKey, &T)> {
        self.hunter
            .iter()
            .map(|v| (ClassKey::Hunter, v))
            .chain(self.titan.iter().map(|v| (ClassKey::Titan, v)))
            .chain(self.warlock.iter().map(|v| (ClassKey::Warlock, v)))
            .chain(self.unknown.iter().map(|v| (ClassKey::Unknown, v)))
    }
}

pub type OrnamentsByClass = ByClass<ArmorOrnament>;
pub type OwnedArmorByClass = ByClass<OwnedArmorItem>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterArmorSlot {
    pub slot: ArmorSlot,
    pub base_item_hash: u32,
    pub base_item_name: String,
    pub icon: String,
    pub class_type: i32,
    pub tier_type: i32,
    pub is_exotic: bool,
    pub available_universal_ornaments: Vec<u32>,
    pub available_armor_specific_ornaments: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterArmorDrip {
    pub character_id: String,
    pub class_type: i32,
    pub armor_slots: Vec<CharacterArmorSlot>,
}

/// The cosmetics report for one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DripReport {
    pub shaders: Vec<OwnedShader>,
    pub universal_ornaments_by_class: OrnamentsByClass,
    /// Universal ornaments present in Collections but not yet unlocked
    pub wishlist_universal_ornaments_by_class: OrnamentsByClass,
    pub armor_specific_ornaments_by_class: OrnamentsByClass,
    /// Legendary and exotic armor only
    pub owned_armor_by_class: OwnedArmorByClass,
    pub owned_exotic_armor: Vec<OwnedArmorItem>,
    pub character_armor_drip: Vec<CharacterArmorDrip>,
}

/// Headline counts for a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub shaders: usize,
    pub universal_owned: usize,
    pub universal_wishlist: usize,
    pub armor_specific: usize,
    pub armor_pieces: usize,
    pub exotic_armor: usize,
    pub characters: usize,
}

impl DripReport {
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            shaders: self.shaders.len(),
            universal_owned: self.universal_ornaments_by_class.total(),
            universal_wishlist: self.wishlist_universal_ornaments_by_class.total(),
            armor_specific: self.armor_specific_ornaments_by_class.total(),
            armor_pieces: self.owned_armor_by_class.total(),
            exotic_armor: self.owned_exotic_armor.len(),
            characters: self.character_armor_drip.len(),
        }
    }
}
