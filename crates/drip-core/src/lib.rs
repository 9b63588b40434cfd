//! ============================================================================
//! DRIP-CORE: Destiny cosmetics report
//! ============================================================================
//! Builds a per-account cosmetics report from the Bungie item manifest and
//! the account's profile:
//! - Catalog loading (items, collectibles, plug sets)
//! - Profile snapshot (collectible state, equipped armor)
//! - Heuristic classification of shaders, ornaments and armor
//! - Ornament -> armor cross-referencing and per-character availability
//! ============================================================================

pub mod bungie;
pub mod config;
pub mod cosmetics;
pub mod drip;
pub mod manifest;
pub mod profile;
pub mod types;

// Re-export main types for convenience
pub use types::*;
pub use bungie::{BungieClient, BungieFetch};
pub use config::DripConfig;
pub use cosmetics::{Classifier, DripReport, HeuristicVocabulary, ReportSummary};
pub use drip::{load_drip_report, DripService};
pub use manifest::CatalogIndex;
pub use profile::MembershipRef;
