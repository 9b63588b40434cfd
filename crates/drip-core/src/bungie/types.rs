//! ============================================================================
//! Bungie Wire Types - Subset of the manifest and profile documents
//! ============================================================================
//! Only the fields the report reads are modelled. Every field is defaulted so
//! entries with missing blocks still deserialize.
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{TierType, CLASS_UNKNOWN};

/// `itemType` discriminator for armor
pub const ITEM_TYPE_ARMOR: i32 = 2;

/// Collectible state bit: the account has not acquired this collectible
pub const COLLECTIBLE_STATE_NOT_ACQUIRED: u32 = 1;

/// Envelope `ErrorCode` for a successful platform call
pub const PLATFORM_SUCCESS: i64 = 1;

// ============================================================================
// Envelope
// ============================================================================

/// Wrapper every platform response arrives in
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PlatformEnvelope {
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Manifest Descriptor
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinyManifest {
    pub version: String,
    /// language -> definition table name -> relative content path
    pub json_world_component_content_paths: HashMap<String, HashMap<String, String>>,
}

// ============================================================================
// Definitions
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayProperties {
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemInventoryBlock {
    pub tier_type: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReusablePlugItem {
    pub plug_item_hash: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocketEntry {
    pub reusable_plug_items: Vec<ReusablePlugItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemSocketBlock {
    pub socket_entries: Vec<SocketEntry>,
}

/// `DestinyInventoryItemDefinition`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItemDefinition {
    pub hash: u32,
    pub display_properties: DisplayProperties,
    pub item_type_display_name: Option<String>,
    pub class_type: Option<i32>,
    pub item_type: i32,
    pub inventory: Option<ItemInventoryBlock>,
    /// Present (with any content) when the item can be inserted into a socket
    pub plug: Option<serde_json::Value>,
    pub sockets: Option<ItemSocketBlock>,
}

impl InventoryItemDefinition {
    pub fn is_plug(&self) -> bool {
        self.plug.is_some()
    }

    /// Lowercased `itemTypeDisplayName`, empty when absent
    pub fn type_label(&self) -> String {
        self.item_type_display_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn description(&self) -> String {
        self.display_properties.description.to_lowercase()
    }

    pub fn class_type(&self) -> i32 {
        self.class_type.unwrap_or(CLASS_UNKNOWN)
    }

    pub fn tier_type_raw(&self) -> i32 {
        self.inventory.as_ref().map(|i| i.tier_type).unwrap_or(0)
    }

    pub fn tier(&self) -> TierType {
        TierType::from_raw(self.tier_type_raw())
    }

    pub fn socket_entries(&self) -> &[SocketEntry] {
        self.sockets
            .as_ref()
            .map(|s| s.socket_entries.as_slice())
            .unwrap_or_default()
    }

    /// Name or a fallback for unnamed entries
    pub fn name_or(&self, fallback: &str) -> String {
        if self.display_properties.name.is_empty() {
            fallback.to_string()
        } else {
            self.display_properties.name.clone()
        }
    }
}

/// `DestinyCollectibleDefinition`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectibleDefinition {
    pub hash: u32,
    pub item_hash: u32,
}

/// `DestinyPlugSetDefinition`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlugSetDefinition {
    pub hash: u32,
    pub reusable_plug_items: Vec<ReusablePlugItem>,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectibleComponent {
    pub state: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectiblesComponent {
    pub collectibles: HashMap<String, CollectibleComponent>,
}

/// A component response: `{ "data": ..., "privacy": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Default for ComponentResponse<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterComponent {
    pub character_id: String,
    pub class_type: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquippedItem {
    pub item_hash: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryComponent {
    pub items: Vec<EquippedItem>,
}

/// `DestinyProfileResponse` restricted to components 100, 200, 205 and 800
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileResponse {
    pub profile_collectibles: ComponentResponse<CollectiblesComponent>,
    pub character_collectibles: ComponentResponse<HashMap<String, CollectiblesComponent>>,
    pub characters: ComponentResponse<HashMap<String, CharacterComponent>>,
    pub character_equipment: ComponentResponse<HashMap<String, InventoryComponent>>,
}
