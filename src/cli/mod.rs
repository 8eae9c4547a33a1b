//! Command-line interface for shipline
//!
//! ```bash
//! shipline "Add export command"          # build, fmt, clippy, bump, commit, push
//! shipline --dry-run "Add export command" # show the plan and the next version
//! shipline --completions zsh > _shipline
//! ```
//!
//! Exactly one positional argument, the commit message, is accepted. Every
//! failure exits with status 1 after printing one diagnostic line on
//! stdout.

pub mod completions;

use crate::executor::{CommandRunner, LocalRunner};
use crate::infrastructure::{Config, RunMetrics, init_logging};
use crate::pipeline::{CommitMessage, ReleaseError, ReleasePipeline};
use crate::version::{ManifestVersionStore, VersionStore};
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI arguments for shipline
#[derive(Parser, Debug)]
#[command(name = "shipline")]
#[command(author, version = crate::VERSION, about, long_about = None)]
struct Args {
    /// Commit message for the release commit
    #[arg(value_name = "COMMIT_MESSAGE")]
    message: Vec<String>,

    /// Manifest holding the version declaration
    #[arg(long, value_name = "PATH")]
    manifest_path: Option<PathBuf>,

    /// Configuration file (defaults to shipline.yaml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show what would run and the next version without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<ShellArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl From<ShellArg> for clap_complete::Shell {
    fn from(shell: ShellArg) -> Self {
        match shell {
            ShellArg::Bash => Self::Bash,
            ShellArg::Zsh => Self::Zsh,
            ShellArg::Fish => Self::Fish,
            ShellArg::PowerShell => Self::PowerShell,
            ShellArg::Elvish => Self::Elvish,
        }
    }
}

/// Build the CLI command for completion generation
#[must_use]
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Parse arguments and run the release
pub fn run() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            println!("{}", ReleaseError::Usage);
            return ExitCode::from(ReleaseError::Usage.exit_code());
        }
    };

    if let Some(shell) = args.completions {
        return match completions::generate_completions(shell.into()) {
            Ok(script) => {
                print!("{script}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        };
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = run_release(&args.message, || build_pipeline(&args), &mut out);
    ExitCode::from(code)
}

fn build_pipeline(args: &Args) -> Result<ReleasePipeline<LocalRunner, ManifestVersionStore>> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = Config::discover(args.config.as_deref(), &cwd)
        .context("Failed to load configuration")?;

    init_logging(if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    });

    let manifest = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| config.manifest_path.clone());
    tracing::debug!(manifest = %manifest.display(), "Resolved manifest");

    let stages = config.stages()?;
    let store = ManifestVersionStore::new(manifest);
    let pipeline = ReleasePipeline::new(LocalRunner::new(), store, stages)?.with_dry_run(args.dry_run);
    Ok(pipeline)
}

/// Validates the positional arguments, then builds and runs the pipeline
///
/// The pipeline is only built once the arguments are known to be valid,
/// so a usage error never loads configuration or runs a command. Returns
/// the process exit code.
pub fn run_release<R, S, F>(args: &[String], build: F, out: &mut dyn Write) -> u8
where
    R: CommandRunner,
    S: VersionStore,
    F: FnOnce() -> Result<ReleasePipeline<R, S>>,
{
    let message = match CommitMessage::from_args(args) {
        Ok(message) => message,
        Err(err) => {
            let _ = writeln!(out, "{err}");
            return err.exit_code();
        }
    };

    match build() {
        Ok(pipeline) => release(&pipeline, &message, out),
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    }
}

/// Runs the pipeline and reports the outcome on `out`
pub fn release<R, S>(
    pipeline: &ReleasePipeline<R, S>,
    message: &CommitMessage,
    out: &mut dyn Write,
) -> u8
where
    R: CommandRunner,
    S: VersionStore,
{
    if pipeline.is_dry_run() {
        for line in pipeline.describe(message) {
            let _ = writeln!(out, "{line}");
        }
    }

    let run = pipeline.execute(message);
    RunMetrics::from_run(&run).log();

    match run.into_result() {
        Ok(run) if run.is_dry_run() => {
            if let Some(change) = run.version() {
                let _ = writeln!(out, "Would bump version {change}");
            }
            let _ = writeln!(out, "Dry run complete, nothing was pushed");
            0
        }
        Ok(_) => {
            let _ = writeln!(out, "Successfully pushed");
            0
        }
        Err(err) => {
            let _ = writeln!(out, "{err}");
            err.exit_code()
        }
    }
}
