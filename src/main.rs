//! shipline - build, lint, bump, commit and push in one command
//!
//! ## Usage
//!
//! ```bash
//! shipline "<commit message>"
//! ```
//!
//! Runs `cargo build --release`, `cargo fmt`, `cargo clippy`, bumps the
//! version in `Cargo.toml`, then `git add .`, `git commit -m <message>` and
//! `git push`, stopping at the first failure.
//!
//! Set `SHIPLINE_LOG=debug` to see every command as it is spawned.

use std::process::ExitCode;

fn main() -> ExitCode {
    shipline::cli::run()
}
