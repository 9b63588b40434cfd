//! ============================================================================
//! Core Types for Drip
//! ============================================================================
//! Error taxonomy plus the small closed enumerations shared by the classifier
//! and the aggregator: class buckets, armor slots and tier ordinals.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Result alias used across drip-core
pub type Result<T> = std::result::Result<T, DripError>;

/// Error types for the report pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DripError {
    #[error("Manifest unavailable for language '{language}'")]
    ManifestUnavailable { language: String },

    #[error("Bungie API error {status}: {message}")]
    UpstreamError { status: u16, message: String },

    /// Lookup miss while classifying. Never surfaced from the report operation.
    #[error("Missing {kind} reference: {hash}")]
    MissingReference { kind: ReferenceKind, hash: u32 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which catalog table a missing reference pointed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Collectible,
    Item,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Collectible => write!(f, "collectible"),
            ReferenceKind::Item => write!(f, "item"),
        }
    }
}

// ============================================================================
// Class Buckets
// ============================================================================

/// Raw `classType` values used by the catalog
pub const CLASS_TITAN: i32 = 0;
pub const CLASS_HUNTER: i32 = 1;
pub const CLASS_WARLOCK: i32 = 2;
pub const CLASS_UNKNOWN: i32 = 3;

/// Report bucket for a character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKey {
    Hunter,
    Titan,
    Warlock,
    Unknown,
}

impl ClassKey {
    /// The three classes a character can actually be
    pub const PLAYABLE: [ClassKey; 3] = [ClassKey::Hunter, ClassKey::Titan, ClassKey::Warlock];

    /// Map the catalog's class enum to a bucket
    pub fn of(class_type: i32) -> Self {
        match class_type {
            CLASS_TITAN => ClassKey::Titan,
            CLASS_HUNTER => ClassKey::Hunter,
            CLASS_WARLOCK => ClassKey::Warlock,
            _ => ClassKey::Unknown,
        }
    }

    /// Human-readable class name
    pub fn label(&self) -> &'static str {
        match self {
            ClassKey::Hunter => "Hunter",
            ClassKey::Titan => "Titan",
            ClassKey::Warlock => "Warlock",
            ClassKey::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// Armor Slots
// ============================================================================

/// Equipment slot an armor-related item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArmorSlot {
    Helmet,
    Gauntlets,
    Chest,
    Legs,
    ClassItem,
    Unknown,
}

impl ArmorSlot {
    /// Slots in inference priority order
    pub const KNOWN: [ArmorSlot; 5] = [
        ArmorSlot::Helmet,
        ArmorSlot::Gauntlets,
        ArmorSlot::Chest,
        ArmorSlot::Legs,
        ArmorSlot::ClassItem,
    ];

    pub fn is_known(&self) -> bool {
        !matches!(self, ArmorSlot::Unknown)
    }

    /// Human-readable slot name
    pub fn label(&self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "Helmet",
            ArmorSlot::Gauntlets => "Gauntlets",
            ArmorSlot::Chest => "Chest",
            ArmorSlot::Legs => "Legs",
            ArmorSlot::ClassItem => "Class Item",
            ArmorSlot::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// Tiers
// ============================================================================

/// Item rarity, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TierType {
    Unknown,
    Currency,
    Basic,
    Common,
    Rare,
    Legendary,
    Exotic,
}

impl TierType {
    /// Map the catalog's `tierType` ordinal; anything unrecognized is `Unknown`
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => TierType::Currency,
            2 => TierType::Basic,
            3 => TierType::Common,
            4 => TierType::Rare,
            5 => TierType::Legendary,
            6 => TierType::Exotic,
            _ => TierType::Unknown,
        }
    }

    pub fn is_legendary_or_better(&self) -> bool {
        *self >= TierType::Legendary
    }

    pub fn is_exotic(&self) -> bool {
        *self == TierType::Exotic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_key_mapping() {
        assert_eq!(ClassKey::of(0), ClassKey::Titan);
        assert_eq!(ClassKey::of(1), ClassKey::Hunter);
        assert_eq!(ClassKey::of(2), ClassKey::Warlock);
        assert_eq!(ClassKey::of(3), ClassKey::Unknown);
        assert_eq!(ClassKey::of(-1), ClassKey::Unknown);
        assert_eq!(ClassKey::of(42), ClassKey::Unknown);
    }

    #[test]
    fn test_class_key_serializes_lowercase() {
        let json = serde_json::to_string(&ClassKey::Warlock).unwrap();
        assert_eq!(json, "\"warlock\"");
    }

    #[test]
    fn test_slot_serialization_and_labels() {
        let json = serde_json::to_string(&ArmorSlot::ClassItem).unwrap();
        assert_eq!(json, "\"classItem\"");
        assert_eq!(ArmorSlot::ClassItem.label(), "Class Item");
        assert!(!ArmorSlot::Unknown.is_known());
        assert!(ArmorSlot::KNOWN.iter().all(|s| s.is_known()));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(TierType::from_raw(5).is_legendary_or_better());
        assert!(TierType::from_raw(6).is_legendary_or_better());
        assert!(!TierType::from_raw(4).is_legendary_or_better());
        assert!(TierType::from_raw(6).is_exotic());
        assert!(!TierType::from_raw(5).is_exotic());
        assert_eq!(TierType::from_raw(99), TierType::Unknown);
    }

    #[test]
    fn test_error_display() {
        let err = DripError::ManifestUnavailable {
            language: "fr".to_string(),
        };
        assert_eq!(err.to_string(), "Manifest unavailable for language 'fr'");

        let err = DripError::MissingReference {
            kind: ReferenceKind::Item,
            hash: 7,
        };
        assert_eq!(err.to_string(), "Missing item reference: 7");
    }
}
