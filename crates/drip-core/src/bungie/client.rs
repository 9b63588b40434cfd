//! ============================================================================
//! Bungie Client - Authenticated access to the Bungie.net platform
//! ============================================================================
//! Platform calls carry the service API key plus the account's bearer token
//! and come back wrapped in an envelope whose `Response` field is unwrapped
//! here. Manifest content documents are plain JSON served from the CDN.
//! ============================================================================

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::types::{PlatformEnvelope, PLATFORM_SUCCESS};
use crate::config::DripConfig;
use crate::types::{DripError, Result};

/// The fetch capability the report pipeline consumes
#[async_trait]
pub trait BungieFetch: Send + Sync {
    /// GET a platform path and return the envelope's `Response` payload
    async fn get(
        &self,
        path: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value>;

    /// GET a bulk manifest content document by its relative path, returning
    /// the raw body so callers decode straight into their own types
    async fn get_content(&self, path: &str) -> Result<Vec<u8>>;
}

/// Decode a JSON payload into a typed value
pub fn decode<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| DripError::Decode(format!("Failed to parse {}: {}", what, e)))
}

/// Decode a raw JSON body into a typed value
pub fn decode_slice<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| DripError::Decode(format!("Failed to parse {}: {}", what, e)))
}

/// reqwest-backed client for the Bungie platform
pub struct BungieClient {
    client: Client,
    api_key: String,
    base_url: String,
    platform_root: String,
}

impl BungieClient {
    pub fn new(config: &DripConfig) -> Self {
        let client = Client::builder()
            .user_agent("drip/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            platform_root: config.platform_url(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn platform_url(&self, path: &str) -> String {
        format!("{}{}", self.platform_root, path)
    }

    fn content_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BungieFetch for BungieClient {
    async fn get(
        &self,
        path: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        let url = self.platform_url(path);
        info!("Bungie GET {}", path);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Content-Type", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| DripError::Transport(format!("Failed to GET {}: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DripError::Transport(format!("Failed to read response body: {}", e)))?;

        unwrap_envelope(status.as_u16(), status.is_success(), &body, path)
    }

    async fn get_content(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.content_url(path);
        info!("Fetching manifest content {}", path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DripError::Transport(format!("Failed to GET {}: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DripError::UpstreamError {
                status: status.as_u16(),
                message: format!("{} {}", path, body),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DripError::Transport(format!("Failed to read content {}: {}", path, e)))?;
        debug!("Read {} bytes of manifest content {}", body.len(), path);
        Ok(body.to_vec())
    }
}

/// Check status and envelope, returning the `Response` payload
fn unwrap_envelope(status: u16, success: bool, body: &str, path: &str) -> Result<serde_json::Value> {
    let envelope = serde_json::from_str::<PlatformEnvelope>(body);

    if !success {
        let message = match envelope {
            Ok(env) => env
                .message
                .or(env.error_status)
                .unwrap_or_else(|| path.to_string()),
            Err(_) => format!("{} {}", path, body),
        };
        return Err(DripError::UpstreamError { status, message });
    }

    let envelope = envelope
        .map_err(|e| DripError::Decode(format!("Failed to parse envelope for {}: {}", path, e)))?;

    if let Some(code) = envelope.error_code {
        if code != PLATFORM_SUCCESS {
            let message = envelope
                .message
                .or(envelope.error_status)
                .unwrap_or_else(|| format!("ErrorCode {}", code));
            return Err(DripError::UpstreamError { status, message });
        }
    }

    debug!("Unwrapped envelope for {}", path);
    envelope
        .response
        .ok_or_else(|| DripError::Decode(format!("Envelope for {} has no Response", path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_urls() {
        let mut config = DripConfig::new("key");
        config.base_url = "http://localhost:9000/".to_string();
        let client = BungieClient::new(&config);

        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(
            client.platform_url("/Destiny2/Manifest/"),
            "http://localhost:9000/Platform/Destiny2/Manifest/"
        );
        assert_eq!(
            client.content_url("/common/destiny2_content/json/en/items.json"),
            "http://localhost:9000/common/destiny2_content/json/en/items.json"
        );
    }

    #[test]
    fn test_unwrap_envelope_success() {
        let body = r#"{"Response": {"version": "1"}, "ErrorCode": 1, "ErrorStatus": "Success"}"#;
        let value = unwrap_envelope(200, true, body, "/x").unwrap();
        assert_eq!(value["version"], "1");
    }

    #[test]
    fn test_unwrap_envelope_http_failure_keeps_status() {
        let body = r#"{"ErrorCode": 99, "ErrorStatus": "WebAuthRequired", "Message": "Login required"}"#;
        let err = unwrap_envelope(401, false, body, "/x").unwrap_err();
        assert_eq!(
            err,
            DripError::UpstreamError {
                status: 401,
                message: "Login required".to_string()
            }
        );
    }

    #[test]
    fn test_unwrap_envelope_non_json_failure() {
        let err = unwrap_envelope(503, false, "<html>down</html>", "/x").unwrap_err();
        assert!(matches!(err, DripError::UpstreamError { status: 503, .. }));
    }

    #[test]
    fn test_unwrap_envelope_error_code_on_ok_status() {
        let body = r#"{"ErrorCode": 1601, "ErrorStatus": "DestinyAccountNotFound"}"#;
        let err = unwrap_envelope(200, true, body, "/x").unwrap_err();
        assert_eq!(
            err,
            DripError::UpstreamError {
                status: 200,
                message: "DestinyAccountNotFound".to_string()
            }
        );
    }

    #[test]
    fn test_unwrap_envelope_missing_response() {
        let err = unwrap_envelope(200, true, r#"{"ErrorCode": 1}"#, "/x").unwrap_err();
        assert!(matches!(err, DripError::Decode(_)));
    }

    #[test]
    fn test_decode_reports_target() {
        let err = decode::<u32>(serde_json::json!("nope"), "counter").unwrap_err();
        match err {
            DripError::Decode(msg) => assert!(msg.contains("counter")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_decode_slice_typed_table() {
        let body = br#"{"1": {"hash": 1}, "2": {"hash": 2}}"#;
        let table: std::collections::HashMap<String, serde_json::Value> =
            decode_slice(body, "table").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["2"]["hash"], 2);

        let err = decode_slice::<u32>(b"not json", "items table").unwrap_err();
        match err {
            DripError::Decode(msg) => assert!(msg.contains("items table")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
