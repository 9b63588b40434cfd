//! ============================================================================
//! Aggregator - Ownership x catalog x cross-reference -> DripReport
//! ============================================================================
//! Every collectible in the merged ownership state is routed to at most one
//! report collection. Lookup misses are dropped: the catalog is versioned
//! independently of the account and may lag or omit entries.
//! ============================================================================

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use super::classify::Classifier;
use super::ownership::{is_acquired, OwnershipState};
use super::report::{
    ArmorOrnament, CharacterArmorDrip, CharacterArmorSlot, DripReport, OwnedArmorItem, OwnedShader,
};
use super::xref::OrnamentArmorIndex;
use crate::bungie::{CollectibleDefinition, InventoryItemDefinition, ProfileResponse};
use crate::manifest::CatalogIndex;
use crate::types::{ArmorSlot, ClassKey, DripError, ReferenceKind, Result, CLASS_UNKNOWN};

/// Builds a report from request-scoped inputs
pub struct Aggregator<'a> {
    catalog: &'a CatalogIndex,
    ornaments: &'a OrnamentArmorIndex,
    classifier: &'a Classifier,
}

/// Working state while walking collectibles
#[derive(Default)]
struct Accumulator {
    report: DripReport,
    /// (class, slot) -> acquired universal ornament hashes
    universal_by_slot: HashMap<(ClassKey, ArmorSlot), Vec<u32>>,
    /// acquired armor-specific ornament hashes
    owned_specific: Vec<u32>,
    skipped: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        catalog: &'a CatalogIndex,
        ornaments: &'a OrnamentArmorIndex,
        classifier: &'a Classifier,
    ) -> Self {
        Self {
            catalog,
            ornaments,
            classifier,
        }
    }

    pub fn aggregate(&self, ownership: &OwnershipState, profile: &ProfileResponse) -> DripReport {
        let mut acc = Accumulator::default();

        for (collectible_hash, state) in ownership.iter() {
            match self.resolve(collectible_hash) {
                Ok((collectible, item)) => {
                    self.classify_collectible(&mut acc, collectible, item, is_acquired(state))
                }
                Err(e) => {
                    debug!("Skipping collectible: {}", e);
                    acc.skipped += 1;
                }
            }
        }

        acc.report.character_armor_drip = self.character_armor(&acc, profile);

        let summary = acc.report.summary();
        info!(
            "Report built: {} shaders, {} universal ({} wishlist), {} armor-specific, {} armor ({} exotic), {} characters, {} skipped",
            summary.shaders,
            summary.universal_owned,
            summary.universal_wishlist,
            summary.armor_specific,
            summary.armor_pieces,
            summary.exotic_armor,
            summary.characters,
            acc.skipped
        );

        acc.report
    }

    /// Collectible definition and the item it unlocks
    fn resolve(
        &self,
        collectible_hash: u32,
    ) -> Result<(&'a CollectibleDefinition, &'a InventoryItemDefinition)> {
        let catalog: &'a CatalogIndex = self.catalog;
        let collectible =
            catalog
                .collectible(collectible_hash)
                .ok_or(DripError::MissingReference {
                    kind: ReferenceKind::Collectible,
                    hash: collectible_hash,
                })?;
        let item = catalog
            .item(collectible.item_hash)
            .ok_or(DripError::MissingReference {
                kind: ReferenceKind::Item,
                hash: collectible.item_hash,
            })?;
        Ok((collectible, item))
    }

    fn classify_collectible(
        &self,
        acc: &mut Accumulator,
        collectible: &CollectibleDefinition,
        item: &InventoryItemDefinition,
        acquired: bool,
    ) {
        let item_hash = collectible.item_hash;
        let collectible_hash = collectible.hash;
        let class_key = ClassKey::of(item.class_type());

        if self.classifier.is_wearable_armor(item) && acquired && item.tier().is_legendary_or_better()
        {
            let entry = OwnedArmorItem {
                item_hash,
                collectible_hash,
                name: item.name_or("Unknown Armor"),
                icon: item.display_properties.icon.clone(),
                class_type: item.class_type(),
                slot: self.classifier.infer_slot(item),
                tier_type: item.tier_type_raw(),
                is_exotic: item.tier().is_exotic(),
            };
            if entry.is_exotic {
                acc.report.owned_exotic_armor.push(entry.clone());
            }
            acc.report.owned_armor_by_class.push(class_key, entry);
        } else if self.classifier.is_shader(item) {
            if acquired {
                acc.report.shaders.push(OwnedShader {
                    item_hash,
                    collectible_hash,
                    name: item.name_or("Unknown Shader"),
                    icon: item.display_properties.icon.clone(),
                });
            }
        } else if self.classifier.is_armor_ornament(item) {
            let is_universal = self.classifier.is_universal_ornament(item);
            if !is_universal && !acquired {
                return;
            }

            let slot = self.classifier.infer_slot(item);
            let entry = self.ornament_entry(item_hash, collectible_hash, item, is_universal, slot);

            match (is_universal, acquired) {
                (true, true) => {
                    let classes: &[ClassKey] = if class_key == ClassKey::Unknown {
                        &ClassKey::PLAYABLE
                    } else {
                        std::slice::from_ref(&class_key)
                    };
                    for class in classes {
                        acc.universal_by_slot
                            .entry((*class, slot))
                            .or_default()
                            .push(item_hash);
                    }
                    acc.report.universal_ornaments_by_class.push(class_key, entry);
                }
                (true, false) => acc
                    .report
                    .wishlist_universal_ornaments_by_class
                    .push(class_key, entry),
                (false, _) => {
                    acc.owned_specific.push(item_hash);
                    acc.report.armor_specific_ornaments_by_class.push(class_key, entry);
                }
            }
        }
    }

    fn ornament_entry(
        &self,
        item_hash: u32,
        collectible_hash: u32,
        item: &InventoryItemDefinition,
        is_universal: bool,
        slot: ArmorSlot,
    ) -> ArmorOrnament {
        let applies_to_item_hashes: Vec<u32> =
            self.ornaments.compatible_armor(item_hash).iter().copied().collect();
        let applies_to_item_names = applies_to_item_hashes
            .iter()
            .filter_map(|hash| self.catalog.item(*hash))
            .map(|def| def.name_or("Unknown Armor"))
            .collect();

        ArmorOrnament {
            item_hash,
            collectible_hash,
            name: item.name_or("Unknown Ornament"),
            icon: item.display_properties.icon.clone(),
            class_type: item.class_type(),
            is_universal,
            slot,
            applies_to_item_hashes,
            applies_to_item_names,
        }
    }

    /// Per-character equipped armor with the ornaments each piece can take
    fn character_armor(&self, acc: &Accumulator, profile: &ProfileResponse) -> Vec<CharacterArmorDrip> {
        let Some(equipment) = &profile.character_equipment.data else {
            return Vec::new();
        };

        // equipped armor hash -> acquired armor-specific ornaments it accepts
        let mut specific_by_armor: HashMap<u32, Vec<u32>> = HashMap::new();
        for ornament_hash in &acc.owned_specific {
            for armor_hash in self.ornaments.compatible_armor(*ornament_hash) {
                specific_by_armor
                    .entry(*armor_hash)
                    .or_default()
                    .push(*ornament_hash);
            }
        }

        let ordered: BTreeMap<&String, _> = equipment.iter().collect();
        ordered
            .into_iter()
            .map(|(character_id, inventory)| {
                let class_type = profile
                    .characters
                    .data
                    .as_ref()
                    .and_then(|chars| chars.get(character_id.as_str()))
                    .and_then(|c| c.class_type)
                    .unwrap_or(CLASS_UNKNOWN);
                let class_key = ClassKey::of(class_type);

                let mut seen: HashSet<ArmorSlot> = HashSet::new();
                let armor_slots = inventory
                    .items
                    .iter()
                    .filter_map(|equipped| match self.catalog.item(equipped.item_hash) {
                        Some(def) => Some((equipped.item_hash, def)),
                        None => {
                            debug!(
                                "Equipped item {} on {} not in catalog",
                                equipped.item_hash, character_id
                            );
                            None
                        }
                    })
                    .filter(|(_, def)| self.classifier.is_wearable_armor(def))
                    .filter_map(|(hash, def)| {
                        let slot = self.classifier.infer_slot(def);
                        if !slot.is_known() || !seen.insert(slot) {
                            return None;
                        }
                        Some(CharacterArmorSlot {
                            slot,
                            base_item_hash: hash,
                            base_item_name: def.name_or("Unknown Armor"),
                            icon: def.display_properties.icon.clone(),
                            class_type: def.class_type(),
                            tier_type: def.tier_type_raw(),
                            is_exotic: def.tier().is_exotic(),
                            available_universal_ornaments: acc
                                .universal_by_slot
                                .get(&(class_key, slot))
                                .cloned()
                                .unwrap_or_default(),
                            available_armor_specific_ornaments: specific_by_armor
                                .get(&hash)
                                .cloned()
                                .unwrap_or_default(),
                        })
                    })
                    .collect();

                CharacterArmorDrip {
                    character_id: character_id.clone(),
                    class_type,
                    armor_slots,
                }
            })
            .collect()
    }
}
