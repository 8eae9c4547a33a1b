//! Record of a single pipeline run

#![allow(clippy::must_use_candidate)]

use super::errors::ReleaseError;
use super::stage::Stage;
use super::types::StageStatus;
use crate::version::VersionChange;
use std::time::Duration;
use uuid::Uuid;

/// Status and timing of one stage within a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    /// Stage name
    pub name: String,
    /// Current status
    pub status: StageStatus,
    /// Wall-clock time spent, once finished
    pub duration: Option<Duration>,
}

/// Ephemeral state of one release run
///
/// Created with every stage pending. Stages move through
/// running to succeeded or failed; the first failure ends the run and
/// leaves the remaining stages pending.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    id: Uuid,
    dry_run: bool,
    stages: Vec<StageRecord>,
    version: Option<VersionChange>,
    error: Option<ReleaseError>,
}

impl PipelineRun {
    /// Creates a run with all `stages` pending
    pub fn new(stages: &[Stage], dry_run: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            dry_run,
            stages: stages
                .iter()
                .map(|stage| StageRecord {
                    name: stage.name.clone(),
                    status: StageStatus::Pending,
                    duration: None,
                })
                .collect(),
            version: None,
            error: None,
        }
    }

    /// Random identifier used to correlate log lines
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True if no external command or write was performed
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Per-stage records in pipeline order
    pub fn stages(&self) -> &[StageRecord] {
        &self.stages
    }

    /// Version change applied (or previewed) by the run, if it got that far
    pub fn version(&self) -> Option<&VersionChange> {
        self.version.as_ref()
    }

    /// Error that ended the run
    pub fn error(&self) -> Option<&ReleaseError> {
        self.error.as_ref()
    }

    /// True if every stage succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.stages.iter().all(|stage| stage.status.is_success())
    }

    /// Converts the run into a `Result`, moving the error out on failure
    ///
    /// # Errors
    ///
    /// Returns the error that ended the run.
    pub fn into_result(mut self) -> Result<Self, ReleaseError> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    pub(crate) fn start(&mut self, index: usize) {
        self.stages[index].status = StageStatus::Running;
    }

    pub(crate) fn succeed(&mut self, index: usize, duration: Duration) {
        let record = &mut self.stages[index];
        record.status = StageStatus::Succeeded;
        record.duration = Some(duration);
    }

    pub(crate) fn fail(&mut self, index: usize, duration: Duration, error: ReleaseError) {
        let record = &mut self.stages[index];
        record.status = StageStatus::Failed;
        record.duration = Some(duration);
        self.error = Some(error);
    }

    pub(crate) fn record_version(&mut self, change: VersionChange) {
        self.version = Some(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FailureKind;

    fn stages() -> Vec<Stage> {
        vec![Stage::bump_version("version"), Stage::bump_version("again")]
    }

    #[test]
    fn test_new_run_is_pending() {
        let run = PipelineRun::new(&stages(), false);

        assert_eq!(run.stages().len(), 2);
        assert!(run.stages().iter().all(|s| s.status == StageStatus::Pending));
        assert!(run.version().is_none());
        assert!(!run.is_success());
    }

    #[test]
    fn test_run_lifecycle() {
        let mut run = PipelineRun::new(&stages(), false);
        run.start(0);
        assert_eq!(run.stages()[0].status, StageStatus::Running);

        run.succeed(0, Duration::from_millis(5));
        run.start(1);
        run.succeed(1, Duration::from_millis(7));

        assert!(run.is_success());
        assert_eq!(run.stages()[1].duration, Some(Duration::from_millis(7)));
        assert!(run.into_result().is_ok());
    }

    #[test]
    fn test_failed_run_into_result() {
        let mut run = PipelineRun::new(&stages(), false);
        run.start(0);
        run.fail(0, Duration::ZERO, ReleaseError::stage(FailureKind::Push));

        assert_eq!(run.stages()[1].status, StageStatus::Pending);
        assert!(!run.is_success());
        assert_eq!(
            run.into_result().unwrap_err(),
            ReleaseError::stage(FailureKind::Push)
        );
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = PipelineRun::new(&stages(), false);
        let b = PipelineRun::new(&stages(), false);
        assert_ne!(a.id(), b.id());
    }
}
