use super::command::CommandLine;
use super::traits::{CommandOutcome, CommandRunner};
use std::process::{Command, Stdio};
use std::time::Instant;

/// Runs commands as child processes on the host system
///
/// Children inherit the standard streams, so tool output and prompts reach
/// the operator unchanged. Nothing is captured or parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRunner;

impl LocalRunner {
    /// Creates a runner using the current directory and environment
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for LocalRunner {
    fn run(&self, command: &CommandLine) -> CommandOutcome {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args());
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        tracing::debug!(command = %command, "Spawning command");
        let start = Instant::now();

        let outcome = match cmd.status() {
            Ok(status) if status.success() => CommandOutcome::Success,
            Ok(status) => CommandOutcome::Failed {
                code: status.code(),
            },
            Err(e) => CommandOutcome::NotStarted {
                reason: e.to_string(),
            },
        };

        tracing::debug!(
            command = %command,
            outcome = %outcome,
            duration_ms = start.elapsed().as_millis(),
            "Command finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_run_successful_command() {
        let runner = LocalRunner::new();
        let outcome = runner.run(&CommandLine::new("true", Vec::<String>::new()));
        assert_eq!(outcome, CommandOutcome::Success);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_failing_command() {
        let runner = LocalRunner::new();
        let outcome = runner.run(&CommandLine::new("sh", ["-c", "exit 3"]));
        assert_eq!(outcome, CommandOutcome::Failed { code: Some(3) });
    }

    #[cfg(unix)]
    #[test]
    fn test_run_passes_arguments_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("release notes");
        let runner = LocalRunner::new();
        let outcome = runner.run(&CommandLine::new(
            "touch",
            [marker.to_string_lossy().into_owned()],
        ));

        assert!(outcome.is_success());
        assert!(marker.exists());
    }

    #[test]
    fn test_run_missing_program() {
        let runner = LocalRunner::new();
        let outcome = runner.run(&CommandLine::new(
            "shipline-definitely-not-a-real-program",
            Vec::<String>::new(),
        ));
        assert!(matches!(outcome, CommandOutcome::NotStarted { .. }));
    }
}
