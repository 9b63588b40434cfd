//! ============================================================================
//! Cosmetics Module - Classification and cross-referencing engine
//! ============================================================================
//! ## Pipeline
//! ```text
//! CatalogIndex ──► Classifier ──► OrnamentArmorIndex ─┐
//!                                                     ├─► Aggregator ─► DripReport
//! ProfileResponse ──► OwnershipState ─────────────────┘
//! ```
//! ============================================================================

mod aggregate;
pub(crate) mod classify;
mod ownership;
mod report;
mod xref;

pub use aggregate::Aggregator;
pub use classify::{Classifier, HeuristicVocabulary, SlotVocabulary, DEFAULT_VOCABULARY_VERSION};
pub use ownership::{is_acquired, OwnershipState};
pub use report::{
    ArmorOrnament, ByClass, CharacterArmorDrip, CharacterArmorSlot, DripReport, OrnamentsByClass,
    OwnedArmorByClass, OwnedArmorItem, OwnedShader, ReportSummary,
};
pub use xref::OrnamentArmorIndex;
