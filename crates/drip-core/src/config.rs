//! ============================================================================
//! Configuration - Environment-driven settings for the report pipeline
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{DripError, Result};

/// Default Bungie host; the platform API lives under `/Platform`
pub const DEFAULT_BASE_URL: &str = "https://www.bungie.net";

/// Default manifest language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Settings for one report invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DripConfig {
    /// Service API key sent as `X-API-Key`
    pub api_key: String,
    pub base_url: String,
    /// Manifest content language
    pub language: String,
    /// Optional JSON file overriding the built-in heuristic vocabulary
    pub vocabulary_path: Option<PathBuf>,
}

impl DripConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            vocabulary_path: None,
        }
    }

    /// Read settings from `BUNGIE_API_KEY`, `BUNGIE_BASE_URL`,
    /// `DRIP_MANIFEST_LANGUAGE` and `DRIP_VOCABULARY_PATH`
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_key(None)
    }

    /// Like `from_env`, but an explicit key replaces `BUNGIE_API_KEY`.
    /// The remaining variables are still read.
    pub fn from_env_with_key(api_key: Option<String>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), api_key)
    }

    /// `DRIP_VOCABULARY_PATH`, ignoring empty values
    pub fn vocabulary_path_from_env() -> Option<PathBuf> {
        vocabulary_path(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .or_else(|| lookup("BUNGIE_API_KEY"))
            .filter(|k| !k.is_empty())
            .ok_or_else(|| DripError::Config("BUNGIE_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("BUNGIE_BASE_URL").filter(|v| !v.is_empty()) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(language) = lookup("DRIP_MANIFEST_LANGUAGE").filter(|v| !v.is_empty()) {
            config.language = language;
        }
        config.vocabulary_path = vocabulary_path(&lookup);

        Ok(config)
    }

    /// Root for enveloped platform calls
    pub fn platform_url(&self) -> String {
        format!("{}/Platform", self.base_url.trim_end_matches('/'))
    }
}

fn vocabulary_path(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    lookup("DRIP_VOCABULARY_PATH")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DripConfig::from_lookup(lookup_from(&[("BUNGIE_API_KEY", "abc")]), None).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, "en");
        assert!(config.vocabulary_path.is_none());
        assert_eq!(config.platform_url(), "https://www.bungie.net/Platform");
    }

    #[test]
    fn test_overrides() {
        let config = DripConfig::from_lookup(lookup_from(&[
            ("BUNGIE_API_KEY", "abc"),
            ("BUNGIE_BASE_URL", "http://localhost:8080/"),
            ("DRIP_MANIFEST_LANGUAGE", "de"),
            ("DRIP_VOCABULARY_PATH", "/tmp/vocab.json"),
        ]), None)
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.language, "de");
        assert_eq!(config.vocabulary_path, Some(PathBuf::from("/tmp/vocab.json")));
    }

    #[test]
    fn test_missing_api_key() {
        let result = DripConfig::from_lookup(lookup_from(&[]), None);
        assert!(matches!(result, Err(DripError::Config(_))));

        let result = DripConfig::from_lookup(lookup_from(&[("BUNGIE_API_KEY", "")]), None);
        assert!(result.is_err());

        let result = DripConfig::from_lookup(lookup_from(&[]), Some(String::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_key_keeps_other_env_values() {
        let config = DripConfig::from_lookup(
            lookup_from(&[
                ("BUNGIE_BASE_URL", "http://localhost:9000"),
                ("DRIP_MANIFEST_LANGUAGE", "de"),
                ("DRIP_VOCABULARY_PATH", "/tmp/vocab.json"),
            ]),
            Some("k".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.language, "de");
        assert_eq!(config.vocabulary_path, Some(PathBuf::from("/tmp/vocab.json")));
    }

    #[test]
    fn test_explicit_key_wins_over_env_key() {
        let config = DripConfig::from_lookup(
            lookup_from(&[("BUNGIE_API_KEY", "from-env")]),
            Some("from-flag".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_key, "from-flag");
    }

    #[test]
    fn test_empty_vocabulary_path_ignored() {
        assert_eq!(vocabulary_path(lookup_from(&[("DRIP_VOCABULARY_PATH", "")])), None);
        assert_eq!(
            vocabulary_path(lookup_from(&[("DRIP_VOCABULARY_PATH", "v.json")])),
            Some(PathBuf::from("v.json"))
        );
    }

    #[test]
    fn test_platform_url_trims_trailing_slash() {
        let mut config = DripConfig::new("k");
        config.base_url = "http://localhost:9000/".to_string();
        assert_eq!(config.platform_url(), "http://localhost:9000/Platform");
    }
}
