//! Infrastructure layer
//!
//! Configuration, logging and run metrics.

mod config;
mod logging;
mod metrics;

pub use config::{Config, StageCommands};
pub use logging::{LOG_ENV, init_logging};
pub use metrics::RunMetrics;
