//! Command execution layer
//!
//! This module contains the command runner capability and its
//! process-backed implementation.

mod command;
mod local;
mod traits;

pub use command::{CommandLine, expand_variables};
pub use local::LocalRunner;
pub use traits::{CommandOutcome, CommandRunner};
