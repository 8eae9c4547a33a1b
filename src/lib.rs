//! # Shipline - release pipeline for Cargo projects
//!
//! Shipline turns "build, format, lint, bump the version, commit and push"
//! into one fail-fast command:
//!
//! ```bash
//! shipline "Add export command"
//! ```
//!
//! Stages run strictly in order and the first failing one ends the run
//! with a one-line diagnostic (`Failed to build`, `Failed to clippy`, ...)
//! and exit status 1.
//!
//! ## Version bumps
//!
//! The first line of the manifest starting with `version` is rewritten in
//! place; every other line is written back byte for byte. The last
//! component is incremented and rolls over at 10 into the component before
//! it, one level deep only:
//!
//! ```rust
//! use shipline::Version;
//!
//! let bump = |v: &str| v.parse::<Version>().unwrap().bump().unwrap().to_string();
//! assert_eq!(bump("0.4.2"), "0.4.3");
//! assert_eq!(bump("0.4.9"), "0.5.0");
//! assert_eq!(bump("1.9.9"), "1.10.0");
//! ```
//!
//! ## Library use
//!
//! [`ReleasePipeline`] takes its command runner and version store as
//! parameters, so either can be replaced:
//!
//! ```rust,no_run
//! use shipline::{CommitMessage, Config, LocalRunner, ManifestVersionStore, ReleasePipeline};
//!
//! # fn main() -> Result<(), shipline::ReleaseError> {
//! let stages = Config::default().stages()?;
//! let pipeline = ReleasePipeline::new(LocalRunner::new(), ManifestVersionStore::default(), stages)?;
//! let run = pipeline.run(&CommitMessage::new("Add export command")?)?;
//! println!("released {}", run.version().map(|c| c.next.to_string()).unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod cli;
pub mod executor;
pub mod infrastructure;
pub mod pipeline;
pub mod version;

// Prelude module for common imports
pub mod prelude;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use executor::{CommandLine, CommandOutcome, CommandRunner, LocalRunner, expand_variables};
pub use infrastructure::{Config, RunMetrics, StageCommands, init_logging};
pub use pipeline::{
    CommitMessage, FailureKind, PipelineRun, ReleaseError, ReleasePipeline, Stage, StageAction,
    StageRecord, StageStatus, Validate,
};
pub use version::{
    ManifestDocument, ManifestVersionStore, Version, VersionChange, VersionLine, VersionStore,
};

/// Version of the shipline crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
