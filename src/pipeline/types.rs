//! Core types for the release pipeline
//!
//! This module contains the stage lifecycle states shared by the
//! orchestrator and the run record.

#![allow(clippy::must_use_candidate)]

use std::fmt;

/// Lifecycle of a single stage within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageStatus {
    /// Not started yet (or never reached)
    #[default]
    Pending,
    /// Currently executing
    Running,
    /// Completed successfully
    Succeeded,
    /// Failed and ended the run
    Failed,
}

impl StageStatus {
    /// Returns true if the stage completed successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns true if the stage failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Returns true once the stage has either succeeded or failed
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Trait for types that can be validated
#[allow(clippy::missing_errors_doc)]
pub trait Validate {
    /// Type of validation error
    type Error;

    /// Validates this type
    fn validate(&self) -> std::result::Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_status_default_is_pending() {
        assert_eq!(StageStatus::default(), StageStatus::Pending);
    }

    #[test]
    fn test_stage_status_predicates() {
        assert!(StageStatus::Succeeded.is_success());
        assert!(!StageStatus::Failed.is_success());
        assert!(StageStatus::Failed.is_failure());
        assert!(!StageStatus::Running.is_finished());
        assert!(!StageStatus::Pending.is_finished());
        assert!(StageStatus::Succeeded.is_finished());
    }

    #[test]
    fn test_stage_status_display() {
        assert_eq!(StageStatus::Pending.to_string(), "PENDING");
        assert_eq!(StageStatus::Running.to_string(), "RUNNING");
        assert_eq!(StageStatus::Succeeded.to_string(), "SUCCEEDED");
        assert_eq!(StageStatus::Failed.to_string(), "FAILED");
    }
}
