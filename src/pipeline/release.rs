//! Release pipeline orchestrator
//!
//! Runs the stage list in order and stops at the first failure. The
//! orchestrator owns no I/O of its own: commands go through a
//! [`CommandRunner`] and the manifest through a [`VersionStore`], both
//! supplied by the caller.

use super::Validate;
use super::errors::ReleaseError;
use super::run::PipelineRun;
use super::stage::{Stage, StageAction};
use crate::executor::CommandRunner;
use crate::version::VersionStore;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Variable holding the commit message in stage commands
pub const MESSAGE_VAR: &str = "MESSAGE";

/// Variable holding the bumped version in stage commands
pub const VERSION_VAR: &str = "VERSION";

/// The single required argument of a release: a non-empty commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    /// Builds the message from the positional command-line arguments
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Usage`] unless there is exactly one argument
    /// and it is not blank.
    pub fn from_args(args: &[String]) -> Result<Self, ReleaseError> {
        match args {
            [message] => Self::new(message.clone()),
            _ => Err(ReleaseError::Usage),
        }
    }

    /// Wraps a message
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Usage`] if the message is blank.
    pub fn new(message: impl Into<String>) -> Result<Self, ReleaseError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ReleaseError::Usage);
        }
        Ok(Self(message))
    }

    /// Message text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Orchestrates the release stages
#[derive(Debug)]
pub struct ReleasePipeline<R, S> {
    runner: R,
    store: S,
    stages: Vec<Stage>,
    dry_run: bool,
}

impl<R: CommandRunner, S: VersionStore> ReleasePipeline<R, S> {
    /// Creates a pipeline over validated stages
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Config`] if any stage is invalid.
    pub fn new(runner: R, store: S, stages: Vec<Stage>) -> Result<Self, ReleaseError> {
        for stage in &stages {
            stage.validate()?;
        }

        Ok(Self {
            runner,
            store,
            stages,
            dry_run: false,
        })
    }

    /// Logs what would happen instead of running commands or writing
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Stages in execution order
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// True if this pipeline only simulates the release
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Runs every stage, stopping at the first failure
    ///
    /// The returned run records how far the release got. Use
    /// [`PipelineRun::into_result`] to get at the error.
    pub fn execute(&self, message: &CommitMessage) -> PipelineRun {
        let mut run = PipelineRun::new(&self.stages, self.dry_run);
        let span = tracing::info_span!("release", run_id = %run.id(), dry_run = self.dry_run);
        let _enter = span.enter();

        tracing::info!(stages = self.stages.len(), "Starting release");

        let mut vars = HashMap::from([(MESSAGE_VAR.to_string(), message.as_str().to_string())]);

        for (index, stage) in self.stages.iter().enumerate() {
            tracing::info!(stage = %stage.name, "Executing stage");
            run.start(index);
            let start = Instant::now();

            match self.execute_stage(stage, &mut vars, &mut run) {
                Ok(()) => {
                    let duration = start.elapsed();
                    tracing::info!(
                        stage = %stage.name,
                        duration_ms = duration.as_millis(),
                        "Stage completed"
                    );
                    run.succeed(index, duration);
                }
                Err(err) => {
                    tracing::error!(stage = %stage.name, error = %err, "Stage failed, stopping release");
                    run.fail(index, start.elapsed(), err);
                    break;
                }
            }
        }

        run
    }

    /// Runs the release and returns the finished run on success
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage.
    pub fn run(&self, message: &CommitMessage) -> Result<PipelineRun, ReleaseError> {
        self.execute(message).into_result()
    }

    fn execute_stage(
        &self,
        stage: &Stage,
        vars: &mut HashMap<String, String>,
        run: &mut PipelineRun,
    ) -> Result<(), ReleaseError> {
        match &stage.action {
            StageAction::Commands { commands, failure } => {
                for command in commands {
                    let command = command.expand(vars);

                    if self.dry_run {
                        tracing::info!(stage = %stage.name, command = %command, "Would run command");
                        continue;
                    }

                    let outcome = self.runner.run(&command);
                    if !outcome.is_success() {
                        tracing::error!(command = %command, outcome = %outcome, "Command failed");
                        return Err(ReleaseError::stage(*failure));
                    }
                }
            }
            StageAction::BumpVersion => {
                let change = if self.dry_run {
                    self.store.preview()?
                } else {
                    self.store.increment()?
                };

                tracing::info!(
                    previous = %change.previous,
                    next = %change.next,
                    dry_run = self.dry_run,
                    "Version bumped"
                );
                vars.insert(VERSION_VAR.to_string(), change.next.to_string());
                run.record_version(change);
            }
        }

        Ok(())
    }

    /// Renders the plan for `message` without running anything
    #[must_use]
    pub fn describe(&self, message: &CommitMessage) -> Vec<String> {
        let vars = HashMap::from([(MESSAGE_VAR.to_string(), message.as_str().to_string())]);

        self.stages
            .iter()
            .map(|stage| match &stage.action {
                StageAction::Commands { commands, .. } => {
                    let commands: Vec<String> = commands
                        .iter()
                        .map(|command| command.expand(&vars).to_string())
                        .collect();
                    format!("{}: {}", stage.name, commands.join(" && "))
                }
                StageAction::BumpVersion => format!("{}: bump manifest version", stage.name),
            })
            .collect()
    }
}
