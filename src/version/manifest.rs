//! Manifest documents as opaque lines plus one version declaration
//!
//! The manifest is never parsed as TOML. It is kept as the exact sequence
//! of lines read from disk, each with its own terminator, and only the
//! first line starting with [`VERSION_KEY`] is interpreted. Every other
//! byte is written back untouched.

use super::number::Version;
use crate::pipeline::ReleaseError;

/// Key that marks the version declaration line
pub const VERSION_KEY: &str = "version";

/// Ordered lines of a manifest file, terminators included
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestDocument {
    lines: Vec<String>,
}

impl ManifestDocument {
    /// Splits text into lines, keeping `\n` / `\r\n` on each line
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// All lines in order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Index of the first line whose trimmed content starts with `version`
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::VersionNotFound`] if no line matches.
    pub fn locate_version_line(&self) -> Result<usize, ReleaseError> {
        self.lines
            .iter()
            .position(|line| line.trim_start().starts_with(VERSION_KEY))
            .ok_or(ReleaseError::VersionNotFound)
    }

    /// Locates and parses the version declaration
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::VersionNotFound`] or
    /// [`ReleaseError::VersionParse`].
    pub fn version_line(&self) -> Result<(usize, VersionLine), ReleaseError> {
        let index = self.locate_version_line()?;
        let line = VersionLine::parse(&self.lines[index])?;
        Ok((index, line))
    }

    /// Replaces one line's content
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_line(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    /// Joins the lines back into file content
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

/// A parsed version declaration that remembers its surrounding text
///
/// `prefix` holds everything before the version value (key, `=`, spacing,
/// opening quote) and `suffix` everything after it (closing quote, trailing
/// whitespace, terminator). Any other text after the value fails to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLine {
    prefix: String,
    version: Version,
    suffix: String,
}

impl VersionLine {
    /// Parses the value after the first `=` as a dotted version
    ///
    /// Whitespace and double quotes around the value are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::VersionParse`] if the line has no `=` or the
    /// value is not made of base-10 integers.
    pub fn parse(line: &str) -> Result<Self, ReleaseError> {
        let display = line.trim_end_matches(['\r', '\n']);

        let Some((_, value_part)) = line.split_once('=') else {
            return Err(ReleaseError::VersionParse {
                line: display.to_string(),
                reason: "missing '='".to_string(),
            });
        };

        let is_wrapper = |c: char| c.is_whitespace() || c == '"';
        let value_offset = line.len() - value_part.len();
        let start = value_offset + (value_part.len() - value_part.trim_start_matches(is_wrapper).len());
        let value = value_part.trim_matches(is_wrapper);
        let end = start + value.len();

        let version = value.parse::<Version>().map_err(|err| match err {
            ReleaseError::VersionParse { reason, .. } => ReleaseError::VersionParse {
                line: display.to_string(),
                reason,
            },
            other => other,
        })?;

        Ok(Self {
            prefix: line[..start].to_string(),
            version,
            suffix: line[end..].to_string(),
        })
    }

    /// The declared version
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Same line layout carrying a different version
    #[must_use]
    pub fn with_version(&self, version: Version) -> Self {
        Self {
            prefix: self.prefix.clone(),
            version,
            suffix: self.suffix.clone(),
        }
    }

    /// Renders the line, always ending with a line terminator
    #[must_use]
    pub fn render(&self) -> String {
        let mut line = format!("{}{}{}", self.prefix, self.version, self.suffix);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = "[package]\nname = \"demo\"\nversion = \"0.1.9\"\nedition = \"2021\"\n\n[dependencies]\nserde = { version = \"1.0\" }\n";

    #[test]
    fn test_parse_keeps_every_byte() {
        let text = "a = 1\r\nversion = \"1.0.0\"\r\n\n# trailing";
        let document = ManifestDocument::parse(text);
        assert_eq!(document.lines().len(), 4);
        assert_eq!(document.to_text(), text);
    }

    #[test]
    fn test_locate_first_match_wins() {
        let document = ManifestDocument::parse(MANIFEST);
        assert_eq!(document.locate_version_line().unwrap(), 2);
    }

    #[test]
    fn test_locate_ignores_leading_whitespace() {
        let document = ManifestDocument::parse("[package]\n   version = \"2.0.0\"\n");
        assert_eq!(document.locate_version_line().unwrap(), 1);
    }

    #[test]
    fn test_locate_missing() {
        let document = ManifestDocument::parse("[package]\nname = \"demo\"\n");
        assert_eq!(
            document.locate_version_line(),
            Err(ReleaseError::VersionNotFound)
        );
    }

    #[test]
    fn test_parse_version_line() {
        let line = VersionLine::parse("version = \"1.2.3\"\n").unwrap();
        assert_eq!(line.version().components(), [1, 2, 3]);
    }

    #[test]
    fn test_parse_unquoted_and_spaced() {
        let line = VersionLine::parse("version=  4.5.6  \n").unwrap();
        assert_eq!(line.version().to_string(), "4.5.6");
    }

    #[test]
    fn test_parse_without_equals() {
        let result = VersionLine::parse("version \"1.2.3\"\n");
        assert!(matches!(
            result,
            Err(ReleaseError::VersionParse { reason, .. }) if reason.contains('=')
        ));
    }

    #[test]
    fn test_parse_non_numeric_component() {
        let result = VersionLine::parse("version = \"1.2.beta\"\n");
        assert!(matches!(
            result,
            Err(ReleaseError::VersionParse { line, .. }) if line == "version = \"1.2.beta\""
        ));
    }

    #[test]
    fn test_parse_workspace_inherited_version() {
        let result = VersionLine::parse("version.workspace = true\n");
        assert!(matches!(result, Err(ReleaseError::VersionParse { .. })));
    }

    #[test]
    fn test_parse_rejects_trailing_comment() {
        let result = VersionLine::parse("version = \"1.2.3\" # bumped by ci\n");
        assert!(matches!(
            result,
            Err(ReleaseError::VersionParse { line, .. }) if line == "version = \"1.2.3\" # bumped by ci"
        ));
    }

    #[test]
    fn test_render_unchanged_round_trips() {
        for original in [
            "version = \"1.2.3\"\n",
            "version=\"0.0.1\"\r\n",
            "  version   =   \"7.8.9\"   \n",
        ] {
            let line = VersionLine::parse(original).unwrap();
            assert_eq!(line.render(), original);
        }
    }

    #[test]
    fn test_render_adds_missing_terminator() {
        let line = VersionLine::parse("version = \"1.2.3\"").unwrap();
        assert_eq!(line.render(), "version = \"1.2.3\"\n");
    }

    #[test]
    fn test_render_with_new_version() {
        let line = VersionLine::parse("version = \"1.2.9\"\n").unwrap();
        let next = line.version().bump().unwrap();
        assert_eq!(line.with_version(next).render(), "version = \"1.3.0\"\n");
    }

    #[test]
    fn test_replace_line_only_touches_target() {
        let mut document = ManifestDocument::parse(MANIFEST);
        let (index, line) = document.version_line().unwrap();
        let next = line.version().bump().unwrap();
        document.replace_line(index, line.with_version(next).render());

        assert_eq!(
            document.to_text(),
            MANIFEST.replace("version = \"0.1.9\"", "version = \"0.2.0\"")
        );
    }
}
