//! ============================================================================
//! Ownership State - Collectible state merged across scopes
//! ============================================================================
//! The profile scope and every character scope each report a state bitmask
//! per collectible. The merged state is the OR of all of them, so folding in
//! the same scope twice changes nothing.
//! ============================================================================

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::bungie::{CollectibleComponent, ProfileResponse, COLLECTIBLE_STATE_NOT_ACQUIRED};

/// Whether a merged state counts as acquired
pub fn is_acquired(state: u32) -> bool {
    state & COLLECTIBLE_STATE_NOT_ACQUIRED == 0
}

/// Collectible hash -> merged state bitmask
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipState {
    states: BTreeMap<u32, u32>,
}

impl OwnershipState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the profile scope and then each character scope
    pub fn from_profile(profile: &ProfileResponse) -> Self {
        let mut scopes: Vec<&HashMap<String, CollectibleComponent>> = Vec::new();

        if let Some(data) = &profile.profile_collectibles.data {
            scopes.push(&data.collectibles);
        }
        if let Some(characters) = &profile.character_collectibles.data {
            let mut ids: Vec<&String> = characters.keys().collect();
            ids.sort();
            scopes.extend(ids.into_iter().map(|id| &characters[id].collectibles));
        }

        let state = scopes.into_iter().fold(Self::new(), |mut acc, scope| {
            acc.merge_scope(scope);
            acc
        });
        debug!("Merged ownership state for {} collectibles", state.len());
        state
    }

    /// OR one scope's states into the map
    pub fn merge_scope(&mut self, scope: &HashMap<String, CollectibleComponent>) {
        for (key, component) in scope {
            match key.parse::<u32>() {
                Ok(hash) => self.merge(hash, component.state),
                Err(_) => warn!("Skipping collectible with non-numeric hash '{}'", key),
            }
        }
    }

    pub fn merge(&mut self, collectible_hash: u32, state: u32) {
        *self.states.entry(collectible_hash).or_insert(0) |= state;
    }

    pub fn state(&self, collectible_hash: u32) -> Option<u32> {
        self.states.get(&collectible_hash).copied()
    }

    pub fn is_acquired(&self, collectible_hash: u32) -> bool {
        self.state(collectible_hash).map(is_acquired).unwrap_or(false)
    }

    /// Entries in ascending collectible hash order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.states.iter().map(|(hash, state)| (*hash, *state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scope(pairs: &[(&str, u32)]) -> HashMap<String, CollectibleComponent> {
        pairs
            .iter()
            .map(|(k, s)| (k.to_string(), CollectibleComponent { state: *s }))
            .collect()
    }

    #[test]
    fn test_is_acquired_bit() {
        for state in 0u32..64 {
            assert_eq!(is_acquired(state), state & COLLECTIBLE_STATE_NOT_ACQUIRED == 0);
        }
        assert!(is_acquired(0));
        assert!(!is_acquired(1));
        assert!(is_acquired(4));
        assert!(!is_acquired(5));
    }

    #[test]
    fn test_merge_is_or_and_idempotent() {
        let a = scope(&[("10", 1), ("11", 4)]);
        let b = scope(&[("10", 16), ("12", 0)]);

        let mut once = OwnershipState::new();
        once.merge_scope(&a);
        once.merge_scope(&b);

        let mut twice = once.clone();
        twice.merge_scope(&a);
        twice.merge_scope(&b);

        assert_eq!(once, twice);
        assert_eq!(once.state(10), Some(17));
        assert_eq!(once.state(11), Some(4));
        assert_eq!(once.state(12), Some(0));
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_not_acquired_in_any_scope_wins() {
        // Character scope acquired, profile scope not: OR keeps the bit set
        let mut state = OwnershipState::new();
        state.merge_scope(&scope(&[("10", 1)]));
        state.merge_scope(&scope(&[("10", 0)]));
        assert!(!state.is_acquired(10));
        assert!(!state.is_acquired(999));
    }

    #[test]
    fn test_non_numeric_keys_skipped() {
        let mut state = OwnershipState::new();
        state.merge_scope(&scope(&[("abc", 0), ("5", 0)]));
        assert_eq!(state.len(), 1);
        assert!(state.is_acquired(5));
    }

    #[test]
    fn test_from_profile_merges_all_scopes() {
        let profile: ProfileResponse = serde_json::from_value(json!({
            "profileCollectibles": { "data": { "collectibles": {
                "1": { "state": 0 },
                "2": { "state": 1 }
            } } },
            "characterCollectibles": { "data": {
                "char-a": { "collectibles": { "2": { "state": 0 }, "3": { "state": 1 } } },
                "char-b": { "collectibles": { "3": { "state": 8 } } }
            } }
        }))
        .unwrap();

        let state = OwnershipState::from_profile(&profile);
        assert_eq!(state.len(), 3);
        assert!(state.is_acquired(1));
        assert!(!state.is_acquired(2));
        assert_eq!(state.state(3), Some(9));

        let hashes: Vec<u32> = state.iter().map(|(h, _)| h).collect();
        assert_eq!(hashes, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_empty_profile() {
        let state = OwnershipState::from_profile(&ProfileResponse::default());
        assert!(state.is_empty());
    }
}
