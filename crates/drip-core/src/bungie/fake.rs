//! In-memory `BungieFetch` for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::client::BungieFetch;
use crate::types::{DripError, Result};

/// Serves canned payloads keyed by path and records every request
#[derive(Default)]
pub(crate) struct FakeBungie {
    platform: HashMap<String, serde_json::Value>,
    content: HashMap<String, serde_json::Value>,
    failures: HashMap<String, u16>,
    pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeBungie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, path: &str, payload: serde_json::Value) -> Self {
        self.platform.insert(path.to_string(), payload);
        self
    }

    pub fn with_content(mut self, path: &str, payload: serde_json::Value) -> Self {
        self.content.insert(path.to_string(), payload);
        self
    }

    pub fn with_failure(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    fn lookup(
        &self,
        map: &HashMap<String, serde_json::Value>,
        path: &str,
    ) -> Result<serde_json::Value> {
        if let Some(status) = self.failures.get(path) {
            return Err(DripError::UpstreamError {
                status: *status,
                message: path.to_string(),
            });
        }
        map.get(path).cloned().ok_or_else(|| DripError::UpstreamError {
            status: 404,
            message: path.to_string(),
        })
    }
}

#[async_trait]
impl BungieFetch for FakeBungie {
    async fn get(
        &self,
        path: &str,
        _access_token: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push((
            path.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self.lookup(&self.platform, path)
    }

    async fn get_content(&self, path: &str) -> Result<Vec<u8>> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), Vec::new()));
        let payload = self.lookup(&self.content, path)?;
        serde_json::to_vec(&payload).map_err(|e| DripError::Decode(e.to_string()))
    }
}
