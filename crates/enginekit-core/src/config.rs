//! Configuration for invoking a deployed agent engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_METADATA_FILE: &str = "deployment_metadata.json";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 10;
pub const DEFAULT_TIME_LIMIT_MS: f64 = 60_000.0;
pub const DEFAULT_REQUEST_TIMEOUT_MS: f64 = 20_000.0;
pub const DEFAULT_USER_ID: &str = "test";
pub const DEFAULT_MESSAGE: &str = "What's the weather in San Francisco?";

/// Top-level EngineKit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineKitConfig {
    /// Deployment metadata JSON holding `remote_agent_engine_id`.
    pub metadata_file: PathBuf,
    /// Number of stream queries fired at once by the load test.
    pub concurrent_requests: usize,
    /// Overall load-test budget in milliseconds.
    pub time_limit_ms: f64,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: f64,
    /// Overrides the regional `https://{location}-aiplatform.googleapis.com` endpoint.
    pub endpoint: Option<String>,
    /// Bearer token sent with every request.
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,
    pub user_id: String,
    pub message: String,
}

impl Default for EngineKitConfig {
    fn default() -> Self {
        Self {
            metadata_file: PathBuf::from(DEFAULT_METADATA_FILE),
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            endpoint: None,
            auth_token: None,
            user_id: DEFAULT_USER_ID.into(),
            message: DEFAULT_MESSAGE.into(),
        }
    }
}

impl EngineKitConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let auth_token = lookup("_AUTH_TOKEN").filter(|t| !t.is_empty());
        if auth_token.is_none() {
            warn!("_AUTH_TOKEN is not set; requests will be sent without credentials");
        }

        Self {
            metadata_file: lookup("ENGINEKIT_METADATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.metadata_file),
            concurrent_requests: lookup("ENGINEKIT_CONCURRENT_REQUESTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.concurrent_requests),
            time_limit_ms: lookup("ENGINEKIT_TIME_LIMIT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.time_limit_ms),
            request_timeout_ms: lookup("ENGINEKIT_REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            endpoint: lookup("ENGINEKIT_ENDPOINT").filter(|e| !e.is_empty()),
            auth_token,
            user_id: lookup("ENGINEKIT_USER_ID").unwrap_or(defaults.user_id),
            message: lookup("ENGINEKIT_MESSAGE").unwrap_or(defaults.message),
        }
    }
}
