//! Concurrent stream-query load test under one overall time limit.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use enginekit_core::{Deadline, EngineKitConfig, Result};

use crate::client::EngineClient;
use crate::types::{LoadTestReport, StreamQueryRequest};

/// Fires `concurrency` identical stream queries that share one deadline.
pub struct LoadTest {
    client: Arc<EngineClient>,
    request: StreamQueryRequest,
    concurrency: usize,
    time_limit_ms: f64,
}

impl LoadTest {
    pub fn new(
        client: EngineClient,
        request: StreamQueryRequest,
        concurrency: usize,
        time_limit_ms: f64,
    ) -> Self {
        Self {
            client: Arc::new(client),
            request,
            concurrency,
            time_limit_ms,
        }
    }

    /// Resolve the engine from the metadata file named in `config` and build the test.
    pub fn from_config(config: &EngineKitConfig) -> Result<Self> {
        let client = EngineClient::from_deployment(config)?;
        let request = StreamQueryRequest::new(&config.user_id, &config.message);
        Ok(Self::new(
            client,
            request,
            config.concurrent_requests,
            config.time_limit_ms,
        ))
    }

    pub async fn run(&self) -> LoadTestReport {
        let started = Instant::now();
        let deadline = Arc::new(Deadline::new(self.time_limit_ms));

        info!(
            "Starting load test: {} concurrent requests, {}ms limit",
            self.concurrency, self.time_limit_ms
        );

        let tasks: Vec<_> = (0..self.concurrency)
            .map(|i| {
                let client = Arc::clone(&self.client);
                let deadline = Arc::clone(&deadline);
                let request = self.request.clone();
                let span = info_span!("loadtest-simple", request = i, request_id = %Uuid::new_v4());
                tokio::spawn(
                    async move {
                        let outcome = client.stream_query(&request, &*deadline).await;
                        info!("Done with request");
                        outcome
                    }
                    .instrument(span),
                )
            })
            .collect();

        let mut report = LoadTestReport {
            requested: self.concurrency,
            ..Default::default()
        };

        for joined in futures::future::join_all(tasks).await {
            match joined {
                Ok(Ok(lines)) => {
                    report.succeeded += 1;
                    report.lines += lines.len();
                }
                Ok(Err(e)) if e.is_deadline() => report.timed_out += 1,
                Ok(Err(e)) => {
                    warn!("Request failed: {}", e);
                    report.failed += 1;
                }
                Err(e) => {
                    error!("Request task panicked: {}", e);
                    report.failed += 1;
                }
            }
        }

        if report.timed_out > 0 {
            info!("Timeout reached. Exiting gracefully.");
        }
        report.elapsed_ms = started.elapsed().as_millis() as u64;

        info!(
            "Load test finished in {}ms: {} ok, {} failed, {} timed out",
            report.elapsed_ms, report.succeeded, report.failed, report.timed_out
        );

        report
    }
}
