//! ============================================================================
//! Cross-Reference Builder - Ornament to base armor index
//! ============================================================================
//! Scans every socketed armor definition and records each reusable plug it
//! accepts. Describes what the catalog permits, independent of ownership.
//! ============================================================================

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::classify::Classifier;
use crate::manifest::CatalogIndex;

/// Ornament item hash -> base armor item hashes that accept it
#[derive(Debug, Clone, Default)]
pub struct OrnamentArmorIndex {
    compatible: HashMap<u32, BTreeSet<u32>>,
}

static EMPTY: BTreeSet<u32> = BTreeSet::new();

impl OrnamentArmorIndex {
    pub fn build(catalog: &CatalogIndex, classifier: &Classifier) -> Self {
        let mut index = Self::default();

        for (armor_hash, def) in &catalog.items {
            let sockets = def.socket_entries();
            if sockets.is_empty() || !classifier.is_armor_piece(def) {
                continue;
            }
            for plug_hash in sockets
                .iter()
                .flat_map(|socket| socket.reusable_plug_items.iter())
                .filter_map(|plug| plug.plug_item_hash)
            {
                index.insert(plug_hash, *armor_hash);
            }
        }

        debug!("Ornament index covers {} plugs", index.compatible.len());
        index
    }

    pub fn insert(&mut self, ornament_hash: u32, armor_hash: u32) {
        self.compatible
            .entry(ornament_hash)
            .or_default()
            .insert(armor_hash);
    }

    /// Compatible armor for an ornament; empty when the ornament is unindexed
    pub fn compatible_armor(&self, ornament_hash: u32) -> &BTreeSet<u32> {
        self.compatible.get(&ornament_hash).unwrap_or(&EMPTY)
    }

    pub fn accepts(&self, ornament_hash: u32, armor_hash: u32) -> bool {
        self.compatible_armor(ornament_hash).contains(&armor_hash)
    }

    pub fn len(&self) -> usize {
        self.compatible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compatible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bungie::{ItemSocketBlock, ReusablePlugItem, SocketEntry};
    use crate::cosmetics::classify::tests::{armor, item, plug};

    fn with_sockets(
        mut def: crate::bungie::InventoryItemDefinition,
        sockets: &[&[u32]],
    ) -> crate::bungie::InventoryItemDefinition {
        def.sockets = Some(ItemSocketBlock {
            socket_entries: sockets
                .iter()
                .map(|plugs| SocketEntry {
                    reusable_plug_items: plugs
                        .iter()
                        .map(|h| ReusablePlugItem {
                            plug_item_hash: Some(*h),
                        })
                        .collect(),
                })
                .collect(),
        });
        def
    }

    fn catalog() -> CatalogIndex {
        let mut catalog = CatalogIndex::default();
        for def in [
            with_sockets(armor(200, "Chest Armor", 0, 6), &[&[10, 11], &[12]]),
            with_sockets(armor(201, "Helmet", 0, 5), &[&[10]]),
            with_sockets(item(202, "Hunter Cloak"), &[&[13]]),
            // weapons are not armor, their plugs must not be indexed
            with_sockets(item(300, "Auto Rifle"), &[&[14]]),
            armor(203, "Gauntlets", 1, 5),
            plug(10, "Chest Armor Ornament", ""),
        ] {
            catalog.items.insert(def.hash, def);
        }
        catalog
    }

    #[test]
    fn test_every_socket_plug_is_indexed() {
        let catalog = catalog();
        let index = OrnamentArmorIndex::build(&catalog, &Classifier::default());

        for (armor_hash, def) in &catalog.items {
            if def.socket_entries().is_empty() || !Classifier::default().is_armor_piece(def) {
                continue;
            }
            for socket in def.socket_entries() {
                for plug in &socket.reusable_plug_items {
                    assert!(index.accepts(plug.plug_item_hash.unwrap(), *armor_hash));
                }
            }
        }
    }

    #[test]
    fn test_index_contents() {
        let index = OrnamentArmorIndex::build(&catalog(), &Classifier::default());

        let compat: Vec<u32> = index.compatible_armor(10).iter().copied().collect();
        assert_eq!(compat, vec![200, 201]);
        assert!(index.accepts(12, 200));
        assert!(index.accepts(13, 202));
        assert!(index.compatible_armor(14).is_empty());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_unknown_ornament_is_empty_not_missing() {
        let index = OrnamentArmorIndex::default();
        assert!(index.is_empty());
        assert!(index.compatible_armor(12345).is_empty());
        assert!(!index.accepts(12345, 1));
    }
}
