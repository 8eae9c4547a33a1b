//! External command descriptors
//!
//! A [`CommandLine`] is a program plus its argument vector. Commands are
//! never handed to a shell: configuration strings are split with
//! shell-style quoting rules once, and `${VAR}` references are expanded
//! per argument afterwards, so an expanded value containing spaces or
//! quotes always stays a single argument.
//!
//! ```rust
//! use shipline::{CommandLine, expand_variables};
//! use std::collections::HashMap;
//!
//! let commit = CommandLine::parse("git commit -m ${MESSAGE}").unwrap();
//! let vars = HashMap::from([("MESSAGE".to_string(), "fix: tidy up".to_string())]);
//! let expanded = commit.expand(&vars);
//! assert_eq!(expanded.args(), ["commit", "-m", "fix: tidy up"]);
//! assert_eq!(expand_variables("v${VERSION}", &HashMap::new()), "v${VERSION}");
//! ```

use crate::pipeline::ReleaseError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("variable pattern is a valid regex")
});

/// A program invocation: executable name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Creates a command from a program and its arguments
    #[must_use]
    pub fn new<I, A>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a command string using shell quoting rules
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Config`] if the quoting is unbalanced or the
    /// string holds no words at all.
    pub fn parse(line: &str) -> Result<Self, ReleaseError> {
        let mut words = shell_words::split(line)
            .map_err(|e| ReleaseError::Config(format!("cannot parse command '{line}': {e}")))?
            .into_iter();

        let program = words
            .next()
            .ok_or_else(|| ReleaseError::Config("command cannot be empty".to_string()))?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Executable name
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the executable
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns a copy with `${VAR}` references expanded in every word
    #[must_use]
    pub fn expand(&self, vars: &HashMap<String, String>) -> Self {
        Self {
            program: expand_variables(&self.program, vars),
            args: self
                .args
                .iter()
                .map(|arg| expand_variables(arg, vars))
                .collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(&self.program).chain(self.args.iter());
        f.write_str(&shell_words::join(words))
    }
}

/// Expands `${VAR}` references in a string
///
/// Unknown variables are left untouched so they surface verbatim in the
/// command that fails, rather than silently becoming empty.
#[must_use]
pub fn expand_variables(input: &str, vars: &HashMap<String, String>) -> String {
    VAR_PATTERN
        .replace_all(input, |caps: &regex::Captures| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            match vars.get(name) {
                Some(value) => value.clone(),
                None => caps
                    .get(0)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_command() {
        let command = CommandLine::parse("cargo build --release").unwrap();
        assert_eq!(command.program(), "cargo");
        assert_eq!(command.args(), ["build", "--release"]);
    }

    #[test]
    fn test_parse_quoted_argument() {
        let command = CommandLine::parse(r#"git commit -m "release ${VERSION}""#).unwrap();
        assert_eq!(command.args(), ["commit", "-m", "release ${VERSION}"]);
    }

    #[test]
    fn test_parse_empty_command() {
        let result = CommandLine::parse("   ");
        assert!(matches!(result, Err(ReleaseError::Config(_))));
    }

    #[test]
    fn test_parse_unbalanced_quotes() {
        let result = CommandLine::parse("git commit -m \"oops");
        assert!(matches!(result, Err(ReleaseError::Config(_))));
    }

    #[test]
    fn test_expand_keeps_message_as_one_argument() {
        let command = CommandLine::new("git", ["commit", "-m", "${MESSAGE}"]);
        let vars = HashMap::from([(
            "MESSAGE".to_string(),
            "Fix \"quoted\" thing; rm -rf".to_string(),
        )]);

        let expanded = command.expand(&vars);
        assert_eq!(expanded.args().len(), 3);
        assert_eq!(expanded.args()[2], "Fix \"quoted\" thing; rm -rf");
    }

    #[test]
    fn test_expand_variables_multiple() {
        let vars = HashMap::from([
            ("VERSION".to_string(), "1.3.0".to_string()),
            ("MESSAGE".to_string(), "ship it".to_string()),
        ]);

        let expanded = expand_variables("v${VERSION}: ${MESSAGE}", &vars);
        assert_eq!(expanded, "v1.3.0: ship it");
    }

    #[test]
    fn test_expand_variables_not_found() {
        let vars = HashMap::from([("FOO".to_string(), "bar".to_string())]);
        assert_eq!(expand_variables("echo ${UNKNOWN}", &vars), "echo ${UNKNOWN}");
    }

    #[test]
    fn test_display_quotes_arguments() {
        let command = CommandLine::new("git", ["commit", "-m", "two words"]);
        assert_eq!(command.to_string(), "git commit -m 'two words'");
    }
}
