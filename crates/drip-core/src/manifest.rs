//! ============================================================================
//! Catalog Loader - Manifest descriptor and definition tables
//! ============================================================================
//! Resolves the language-specific content paths from the manifest descriptor
//! and pulls the item, collectible and plug set tables concurrently. Each
//! table arrives as a JSON object keyed by stringified hash.
//! ============================================================================

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::bungie::{
    decode, decode_slice, BungieFetch, CollectibleDefinition, DestinyManifest, InventoryItemDefinition,
    PlugSetDefinition,
};
use crate::types::{DripError, Result};

pub const MANIFEST_PATH: &str = "/Destiny2/Manifest/";

const ITEM_TABLE: &str = "DestinyInventoryItemDefinition";
const COLLECTIBLE_TABLE: &str = "DestinyCollectibleDefinition";
const PLUG_SET_TABLE: &str = "DestinyPlugSetDefinition";

/// Hash-keyed definition tables for one request
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    pub items: HashMap<u32, InventoryItemDefinition>,
    pub collectibles: HashMap<u32, CollectibleDefinition>,
    pub plug_sets: HashMap<u32, PlugSetDefinition>,
}

impl CatalogIndex {
    pub fn item(&self, hash: u32) -> Option<&InventoryItemDefinition> {
        self.items.get(&hash)
    }

    pub fn collectible(&self, hash: u32) -> Option<&CollectibleDefinition> {
        self.collectibles.get(&hash)
    }
}

/// Fetch the manifest descriptor
pub async fn fetch_manifest(fetch: &dyn BungieFetch, access_token: &str) -> Result<DestinyManifest> {
    let value = fetch.get(MANIFEST_PATH, access_token, &[]).await?;
    decode(value, "manifest descriptor")
}

/// Languages the descriptor offers content for, sorted
pub fn available_languages(manifest: &DestinyManifest) -> Vec<String> {
    let mut languages: Vec<String> = manifest
        .json_world_component_content_paths
        .keys()
        .cloned()
        .collect();
    languages.sort();
    languages
}

/// Fetch and index the three definition tables for `language`
pub async fn load_catalog(
    fetch: &dyn BungieFetch,
    access_token: &str,
    language: &str,
) -> Result<CatalogIndex> {
    let manifest = fetch_manifest(fetch, access_token).await?;
    info!("Manifest version {}", manifest.version);

    let paths = manifest
        .json_world_component_content_paths
        .get(language)
        .ok_or_else(|| DripError::ManifestUnavailable {
            language: language.to_string(),
        })?;

    let table_path = |table: &str| {
        paths
            .get(table)
            .cloned()
            .ok_or_else(|| DripError::ManifestUnavailable {
                language: language.to_string(),
            })
    };
    let item_path = table_path(ITEM_TABLE)?;
    let collectible_path = table_path(COLLECTIBLE_TABLE)?;
    let plug_set_path = table_path(PLUG_SET_TABLE)?;

    let (items, collectibles, plug_sets) = tokio::try_join!(
        fetch_table::<InventoryItemDefinition>(fetch, &item_path, ITEM_TABLE),
        fetch_table::<CollectibleDefinition>(fetch, &collectible_path, COLLECTIBLE_TABLE),
        fetch_table::<PlugSetDefinition>(fetch, &plug_set_path, PLUG_SET_TABLE),
    )?;

    info!(
        "Catalog loaded: {} items, {} collectibles, {} plug sets",
        items.len(),
        collectibles.len(),
        plug_sets.len()
    );

    Ok(CatalogIndex {
        items,
        collectibles,
        plug_sets,
    })
}

async fn fetch_table<T: DeserializeOwned>(
    fetch: &dyn BungieFetch,
    path: &str,
    table: &str,
) -> Result<HashMap<u32, T>> {
    let body = fetch.get_content(path).await?;
    let raw: HashMap<String, T> = decode_slice(&body, table)?;
    Ok(index_by_hash(raw, table))
}

/// Re-key a table by parsing its string keys; unparseable keys are dropped
fn index_by_hash<T>(raw: HashMap<String, T>, table: &str) -> HashMap<u32, T> {
    let total = raw.len();
    let indexed: HashMap<u32, T> = raw
        .into_iter()
        .filter_map(|(key, def)| match key.parse::<u32>() {
            Ok(hash) => Some((hash, def)),
            Err(_) => {
                warn!("Skipping {} entry with non-numeric key '{}'", table, key);
                None
            }
        })
        .collect();
    debug!("Indexed {}/{} {} entries", indexed.len(), total, table);
    indexed
}
