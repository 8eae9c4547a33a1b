//! Error types for the release pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Stages whose failure is reported with a fixed diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Release build failed
    Build,
    /// Formatter failed
    Format,
    /// Linter failed
    Lint,
    /// Staging or committing failed
    Commit,
    /// Pushing to the remote failed
    Push,
}

impl FailureKind {
    /// Operator-facing diagnostic printed when a stage of this kind fails
    #[must_use]
    pub fn diagnostic(self) -> &'static str {
        match self {
            Self::Build => "Failed to build",
            Self::Format => "Failed to format",
            Self::Lint => "Failed to clippy",
            Self::Commit => "Failed to commit",
            Self::Push => "Failed to push",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diagnostic())
    }
}

/// Errors that can occur during a release run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    /// Wrong number of positional arguments
    #[error("Usage: shipline <commit message>")]
    Usage,

    /// Manifest is missing or unreadable
    #[error("Failed to read manifest {}: {reason}", path.display())]
    ManifestRead {
        /// Manifest location.
        path: PathBuf,
        /// Underlying I/O error message.
        reason: String,
    },

    /// No line declares the version
    #[error("No `version` declaration found in manifest")]
    VersionNotFound,

    /// Version line could not be parsed
    #[error("Invalid version line '{line}': {reason}")]
    VersionParse {
        /// The offending line, without its terminator.
        line: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Incrementing a component would overflow
    #[error("Cannot bump version {version}: component overflow")]
    VersionOverflow {
        /// The version that could not be bumped.
        version: String,
    },

    /// Manifest could not be written back
    #[error("Failed to write manifest {}: {reason}", path.display())]
    ManifestWrite {
        /// Manifest location.
        path: PathBuf,
        /// Underlying I/O error message.
        reason: String,
    },

    /// An external command stage exited unsuccessfully
    #[error("{kind}")]
    StageFailed {
        /// Which stage failed.
        kind: FailureKind,
    },

    /// Configuration file is unreadable or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ReleaseError {
    /// Process exit code for this error
    ///
    /// Every failure path exits with 1; they differ only in the diagnostic.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        1
    }

    pub(crate) fn stage(kind: FailureKind) -> Self {
        Self::StageFailed { kind }
    }
}
