//! Configuration management
//!
//! Configuration is optional. Without a file the pipeline runs the
//! standard Cargo/git release commands against `Cargo.toml`. A YAML file
//! can override any subset of them:
//!
//! ```yaml
//! manifest_path: crates/app/Cargo.toml
//! log_level: debug
//! commands:
//!   lint: cargo clippy -- -D warnings
//!   commit: git commit -m "release ${VERSION}: ${MESSAGE}"
//! ```

use crate::executor::CommandLine;
use crate::pipeline::{FailureKind, ReleaseError, Stage};
use crate::version::ManifestVersionStore;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Manifest holding the version declaration
    pub manifest_path: PathBuf,
    /// Default log level
    pub log_level: String,
    /// Commands run by each stage
    pub commands: StageCommands,
}

/// Command strings for each external stage
///
/// Strings are split with shell quoting rules; `${MESSAGE}` and
/// `${VERSION}` are expanded per argument at run time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageCommands {
    /// Release build
    pub build: String,
    /// Formatter, in apply mode
    pub format: String,
    /// Linter
    pub lint: String,
    /// Stage every change for commit
    pub stage: String,
    /// Commit with the release message
    pub commit: String,
    /// Push to the remote
    pub push: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(ManifestVersionStore::DEFAULT_PATH),
            log_level: "info".to_string(),
            commands: StageCommands::default(),
        }
    }
}

impl Default for StageCommands {
    fn default() -> Self {
        Self {
            build: "cargo build --release".to_string(),
            format: "cargo fmt".to_string(),
            lint: "cargo clippy".to_string(),
            stage: "git add .".to_string(),
            commit: "git commit -m ${MESSAGE}".to_string(),
            push: "git push".to_string(),
        }
    }
}

impl Config {
    /// File picked up from the working directory when no path is given
    pub const DEFAULT_FILE: &'static str = "shipline.yaml";

    /// Parses configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Config`] on malformed YAML or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self, ReleaseError> {
        serde_yaml::from_str(text).map_err(|e| ReleaseError::Config(e.to_string()))
    }

    /// Loads configuration from a file
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReleaseError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ReleaseError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&text).map_err(|e| prefixed(&path.display().to_string(), e))
    }

    /// Resolves the configuration for a run
    ///
    /// An explicit path must exist. Otherwise [`Self::DEFAULT_FILE`] in
    /// `dir` is used when present, and built-in defaults when not.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Config`] if a selected file is unusable.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ReleaseError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default = dir.join(Self::DEFAULT_FILE);
        if default.is_file() {
            tracing::debug!(path = %default.display(), "Using configuration file");
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// Builds the release stage list
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Config`] if a command string is empty or
    /// has unbalanced quotes.
    pub fn stages(&self) -> Result<Vec<Stage>, ReleaseError> {
        let commands = &self.commands;
        let parse = |label: &str, line: &str| {
            CommandLine::parse(line).map_err(|e| prefixed(&format!("commands.{label}"), e))
        };

        Ok(vec![
            Stage::command("build", parse("build", &commands.build)?, FailureKind::Build),
            Stage::command("format", parse("format", &commands.format)?, FailureKind::Format),
            Stage::command("lint", parse("lint", &commands.lint)?, FailureKind::Lint),
            Stage::bump_version("version"),
            Stage::commands(
                "commit",
                vec![
                    parse("stage", &commands.stage)?,
                    parse("commit", &commands.commit)?,
                ],
                FailureKind::Commit,
            ),
            Stage::command("push", parse("push", &commands.push)?, FailureKind::Push),
        ])
    }
}

fn prefixed(context: &str, err: ReleaseError) -> ReleaseError {
    match err {
        ReleaseError::Config(message) => ReleaseError::Config(format!("{context}: {message}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StageAction;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.manifest_path, PathBuf::from("Cargo.toml"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.commands.lint, "cargo clippy");
    }

    #[test]
    fn test_default_stage_order() {
        let stages = Config::default().stages().unwrap();
        let names: Vec<&str> = stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["build", "format", "lint", "version", "commit", "push"]);

        let StageAction::Commands { commands, failure } = &stages[4].action else {
            panic!("commit stage should run commands");
        };
        assert_eq!(*failure, FailureKind::Commit);
        assert_eq!(commands[0].to_string(), "git add .");
        assert_eq!(commands[1].args(), ["commit", "-m", "${MESSAGE}"]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "log_level: debug\ncommands:\n  lint: cargo clippy -- -D warnings\n",
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.commands.lint, "cargo clippy -- -D warnings");
        assert_eq!(config.commands.build, "cargo build --release");
        assert_eq!(config.manifest_path, PathBuf::from("Cargo.toml"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_yaml("commands:\n  deploy: ./deploy.sh\n");
        assert!(matches!(result, Err(ReleaseError::Config(_))));
    }

    #[test]
    fn test_empty_command_rejected() {
        let config = Config::from_yaml("commands:\n  push: ''\n").unwrap();
        let err = config.stages().unwrap_err();
        assert!(err.to_string().contains("commands.push"));
    }

    #[test]
    fn test_discover_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_discover_default_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(Config::DEFAULT_FILE),
            "manifest_path: app/Cargo.toml\n",
        )
        .unwrap();

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.manifest_path, PathBuf::from("app/Cargo.toml"));
    }

    #[test]
    fn test_discover_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            Config::discover(Some(&missing), dir.path()),
            Err(ReleaseError::Config(_))
        ));
    }
}
