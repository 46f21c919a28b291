//! Conversation plumbing for the SQL agent demo.
//!
//! Message parts are an explicit tagged union; rendering matches on every
//! kind. The SQL tool runs statements against an ephemeral SQLite file.

pub mod render;
pub mod sql;
pub mod types;

pub use render::{extract_parts, render_message, render_messages};
pub use sql::{SqlRunResult, SqlRunner};
pub use types::*;
