//! HTTP client for a deployed engine's `:streamQuery` method.

use std::time::Duration;

use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};

use enginekit_core::{Clock, Deadline, EngineKitConfig, Error, Result};

use crate::bound::within;
use crate::metadata::{DeploymentMetadata, ReasoningEngineId};
use crate::types::StreamQueryRequest;

/// Sends stream queries to one engine URL.
pub struct EngineClient {
    http: Client,
    url: String,
    auth_token: Option<String>,
}

impl EngineClient {
    pub fn new(
        url: impl Into<String>,
        auth_token: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            url: url.into(),
            auth_token,
        })
    }

    /// Client for `engine`, honouring the endpoint override and timeouts in `config`.
    pub fn from_config(config: &EngineKitConfig, engine: &ReasoningEngineId) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| engine.default_endpoint());
        let url = engine.stream_query_url(&endpoint);
        info!("Using URL: {}", url);

        let timeout = Duration::try_from_secs_f64(config.request_timeout_ms / 1000.0)
            .map_err(|e| Error::Config(format!("invalid request timeout: {}", e)))?;
        Self::new(url, config.auth_token.clone(), timeout)
    }

    /// Client for the engine named in the metadata file from `config`.
    pub fn from_deployment(config: &EngineKitConfig) -> Result<Self> {
        let engine = DeploymentMetadata::load(&config.metadata_file)?.engine_id()?;
        Self::from_config(config, &engine)
    }

    /// Send one stream query bounded by the configured request timeout.
    pub async fn invoke(&self, request: &StreamQueryRequest, timeout_ms: f64) -> Result<Vec<String>> {
        info!(
            "Invoking engine as user '{}' with message: '{}'",
            request.input.user_id, request.input.message
        );
        let deadline = Deadline::new(timeout_ms);
        self.stream_query(request, &deadline).await
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `request` and collect the non-empty response lines.
    ///
    /// The whole exchange, including reading the streamed body, must finish
    /// before `deadline`.
    pub async fn stream_query<C: Clock>(
        &self,
        request: &StreamQueryRequest,
        deadline: &Deadline<C>,
    ) -> Result<Vec<String>> {
        debug!(
            "Stream query with {:.3}s remaining",
            deadline.timeout_seconds()
        );
        within(deadline, self.send_and_read(request)).await
    }

    async fn send_and_read(&self, request: &StreamQueryRequest) -> Result<Vec<String>> {
        let mut builder = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(format!("API error {}: {}", status, body)));
        }

        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut lines = Vec::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| Error::Http(format!("Stream read error: {}", e)))?;
            buffer.extend_from_slice(&bytes);

            // Decode whole lines only; a chunk may end mid-character.
            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8(raw)
                    .map_err(|e| Error::Http(format!("Invalid UTF-8 in stream: {}", e)))?;
                push_line(&mut lines, line.trim().to_string());
            }
        }
        push_line(&mut lines, String::from_utf8_lossy(&buffer).trim().to_string());

        Ok(lines)
    }
}

fn push_line(lines: &mut Vec<String>, line: String) {
    if !line.is_empty() {
        info!("Got line {}", line);
        lines.push(line);
    }
}
