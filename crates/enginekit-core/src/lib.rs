//! EngineKit Core — deadline budgets, clock sources, configuration.

pub mod clock;
pub mod config;
pub mod deadline;
pub mod error;

pub use clock::{Clock, ManualClock, MonotonicClock, SystemClock};
pub use config::EngineKitConfig;
pub use deadline::Deadline;
pub use error::{Error, Result};
