//! Command execution traits
//!
//! The release pipeline only ever observes whether an external command
//! succeeded. [`CommandRunner`] is the seam where real processes are
//! swapped for fakes.

use super::command::CommandLine;
use std::fmt;

/// Observable result of running one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Process exited with status 0
    Success,

    /// Process ran and exited unsuccessfully
    Failed {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Process could not be started at all
    NotStarted {
        /// Reason reported by the operating system
        reason: String,
    },
}

impl CommandOutcome {
    /// Returns true if the command exited successfully
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed { code: Some(code) } => write!(f, "exit code {code}"),
            Self::Failed { code: None } => write!(f, "terminated by signal"),
            Self::NotStarted { reason } => write!(f, "not started: {reason}"),
        }
    }
}

/// Capability to run external commands to completion
pub trait CommandRunner {
    /// Runs a command, blocking until it terminates
    fn run(&self, command: &CommandLine) -> CommandOutcome;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &CommandLine) -> CommandOutcome {
        (**self).run(command)
    }
}
