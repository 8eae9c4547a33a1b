//! Run metrics
//!
//! Summarizes a finished run for the log.

use crate::pipeline::{PipelineRun, StageStatus};
use std::time::Duration;
use uuid::Uuid;

/// Metrics for one release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetrics {
    /// Run identifier
    pub run_id: Uuid,

    /// Time spent across finished stages
    pub duration: Duration,

    /// Number of stages
    pub stage_count: usize,

    /// Number of successful stages
    pub successful_stages: usize,

    /// Number of failed stages
    pub failed_stages: usize,

    /// Stages never reached
    pub skipped_stages: usize,
}

impl RunMetrics {
    /// Collects metrics from a run
    #[must_use]
    pub fn from_run(run: &PipelineRun) -> Self {
        let count = |predicate: fn(&StageStatus) -> bool| {
            run.stages()
                .iter()
                .filter(|stage| predicate(&stage.status))
                .count()
        };

        Self {
            run_id: run.id(),
            duration: run.stages().iter().filter_map(|stage| stage.duration).sum(),
            stage_count: run.stages().len(),
            successful_stages: count(StageStatus::is_success),
            failed_stages: count(StageStatus::is_failure),
            skipped_stages: count(|status: &StageStatus| !status.is_finished()),
        }
    }

    /// Emits the summary as a single log event
    pub fn log(&self) {
        tracing::info!(
            run_id = %self.run_id,
            duration_ms = self.duration.as_millis(),
            stages = self.stage_count,
            succeeded = self.successful_stages,
            failed = self.failed_stages,
            skipped = self.skipped_stages,
            "Release run finished"
        );
    }
}
