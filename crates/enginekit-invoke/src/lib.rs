//! Invocation of a deployed agent engine.
//!
//! Resolves the stream-query endpoint from deployment metadata, sends
//! stream queries bounded by a shared [`enginekit_core::Deadline`], and
//! fans them out as a small load test.

pub mod bound;
pub mod client;
pub mod loadtest;
pub mod metadata;
pub mod types;

pub use bound::within;
pub use client::EngineClient;
pub use loadtest::LoadTest;
pub use metadata::{DeploymentMetadata, ReasoningEngineId};
pub use types::*;
