//! Wire and report types.

use serde::{Deserialize, Serialize};

pub const STREAM_QUERY_METHOD: &str = "async_stream_query";

/// Body of a `:streamQuery` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamQueryRequest {
    pub class_method: String,
    pub input: StreamQueryInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamQueryInput {
    pub user_id: String,
    pub message: String,
}

impl StreamQueryRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_method: STREAM_QUERY_METHOD.into(),
            input: StreamQueryInput {
                user_id: user_id.into(),
                message: message.into(),
            },
        }
    }
}

/// Aggregate outcome of a load test run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestReport {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub timed_out: usize,
    /// Total non-empty response lines across successful requests.
    pub lines: usize,
    pub elapsed_ms: u64,
}
