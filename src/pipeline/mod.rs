//! Release pipeline domain types and orchestration

pub mod errors;
pub mod release;
pub mod run;
pub mod stage;
pub mod types;

pub use errors::{FailureKind, ReleaseError};
pub use release::{CommitMessage, MESSAGE_VAR, ReleasePipeline, VERSION_VAR};
pub use run::{PipelineRun, StageRecord};
pub use stage::{Stage, StageAction};
pub use types::{StageStatus, Validate};
