//! ============================================================================
//! Bungie Module - Platform client and wire types
//! ============================================================================

mod client;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use client::{decode, decode_slice, BungieClient, BungieFetch};
pub use types::*;
