//! Prelude module for common imports

pub use crate::executor::{CommandLine, CommandOutcome, CommandRunner, LocalRunner};
pub use crate::infrastructure::Config;
pub use crate::pipeline::{
    CommitMessage, FailureKind, PipelineRun, ReleaseError, ReleasePipeline, Stage, StageAction,
    StageStatus, Validate,
};
pub use crate::version::{ManifestVersionStore, Version, VersionChange, VersionStore};
