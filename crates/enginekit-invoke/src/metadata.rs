//! Deployment metadata and reasoning-engine resource names.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use enginekit_core::{Error, Result};

/// Contents of `deployment_metadata.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentMetadata {
    pub remote_agent_engine_id: String,
}

impl DeploymentMetadata {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Metadata(format!("cannot read {}: {}", path.display(), e))
        })?;
        let metadata: Self = serde_json::from_str(&raw)?;
        info!(
            "Using remote agent engine ID: {}",
            metadata.remote_agent_engine_id
        );
        Ok(metadata)
    }

    pub fn engine_id(&self) -> Result<ReasoningEngineId> {
        self.remote_agent_engine_id.parse()
    }
}

/// Parsed `projects/{p}/locations/{l}/reasoningEngines/{e}` resource name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningEngineId {
    pub project: String,
    pub location: String,
    pub engine_id: String,
}

impl ReasoningEngineId {
    /// Regional API endpoint for this engine's location.
    pub fn default_endpoint(&self) -> String {
        format!("https://{}-aiplatform.googleapis.com", self.location)
    }

    /// Full `:streamQuery` URL under `endpoint` (no trailing slash expected).
    pub fn stream_query_url(&self, endpoint: &str) -> String {
        format!(
            "{}/v1/{}:streamQuery",
            endpoint.trim_end_matches('/'),
            self
        )
    }
}

impl fmt::Display for ReasoningEngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/reasoningEngines/{}",
            self.project, self.location, self.engine_id
        )
    }
}

impl FromStr for ReasoningEngineId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        match parts.as_slice() {
            ["projects", project, "locations", location, "reasoningEngines", engine_id]
                if !project.is_empty() && !location.is_empty() && !engine_id.is_empty() =>
            {
                Ok(Self {
                    project: project.to_string(),
                    location: location.to_string(),
                    engine_id: engine_id.to_string(),
                })
            }
            _ => Err(Error::Metadata(format!(
                "expected projects/<p>/locations/<l>/reasoningEngines/<e>, got '{}'",
                s
            ))),
        }
    }
}
