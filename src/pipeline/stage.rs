//! Stage descriptors for the release pipeline
//!
//! A release is an ordered list of [`Stage`]s. Each stage either runs one
//! or more external commands, failing with a fixed [`FailureKind`], or
//! bumps the manifest version.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use super::Validate;
use super::errors::{FailureKind, ReleaseError};
use crate::executor::CommandLine;
use std::fmt;

/// Maximum length accepted for a stage name
const MAX_NAME_LEN: usize = 64;

/// What a stage does when it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageAction {
    /// Run commands in order; the first unsuccessful one fails the stage
    Commands {
        /// Commands to run
        commands: Vec<CommandLine>,
        /// Diagnostic reported when any command fails
        failure: FailureKind,
    },

    /// Bump the manifest version; store errors propagate as they are
    BumpVersion,
}

/// A named step of the release pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Stage name, used in logs and the run summary
    pub name: String,

    /// Work performed by the stage
    pub action: StageAction,
}

impl Stage {
    /// Creates a stage running `commands`
    pub fn commands(
        name: impl Into<String>,
        commands: Vec<CommandLine>,
        failure: FailureKind,
    ) -> Self {
        Self {
            name: name.into(),
            action: StageAction::Commands { commands, failure },
        }
    }

    /// Creates a stage running a single command
    pub fn command(name: impl Into<String>, command: CommandLine, failure: FailureKind) -> Self {
        Self::commands(name, vec![command], failure)
    }

    /// Creates the version bump stage
    pub fn bump_version(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: StageAction::BumpVersion,
        }
    }
}

impl Validate for Stage {
    type Error = ReleaseError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.is_empty() {
            return Err(ReleaseError::Config("stage name cannot be empty".to_string()));
        }

        if self.name.len() > MAX_NAME_LEN {
            return Err(ReleaseError::Config(format!(
                "stage name too long: max {MAX_NAME_LEN} characters, got {}",
                self.name.len()
            )));
        }

        if let StageAction::Commands { commands, .. } = &self.action {
            if commands.is_empty() {
                return Err(ReleaseError::Config(format!(
                    "stage '{}' must run at least one command",
                    self.name
                )));
            }
            if commands.iter().any(|command| command.program().is_empty()) {
                return Err(ReleaseError::Config(format!(
                    "stage '{}' has a command with an empty program",
                    self.name
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            StageAction::Commands { commands, .. } => {
                write!(f, "Stage({}): {} commands", self.name, commands.len())
            }
            StageAction::BumpVersion => write!(f, "Stage({}): bump version", self.name),
        }
    }
}
