//! Version store capability and its manifest-file implementation

use super::manifest::ManifestDocument;
use super::number::Version;
use crate::pipeline::ReleaseError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Version before and after a bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    /// Version found in the manifest
    pub previous: Version,
    /// Version written (or that would be written)
    pub next: Version,
}

impl fmt::Display for VersionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.previous, self.next)
    }
}

/// Capability to load and persist the manifest holding the version
///
/// Implementors supply `load` and `save`; the bump itself is shared.
pub trait VersionStore {
    /// Reads the manifest
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::ManifestRead`] if it cannot be read.
    fn load(&self) -> Result<ManifestDocument, ReleaseError>;

    /// Replaces the manifest with `document`
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::ManifestWrite`] on any I/O failure.
    fn save(&self, document: &ManifestDocument) -> Result<(), ReleaseError>;

    /// Computes the bumped version without writing anything
    ///
    /// # Errors
    ///
    /// Propagates load, locate, parse and bump failures.
    fn preview(&self) -> Result<VersionChange, ReleaseError> {
        let document = self.load()?;
        let (_, line) = document.version_line()?;
        let next = line.version().bump()?;
        Ok(VersionChange {
            previous: line.version().clone(),
            next,
        })
    }

    /// Bumps the version and writes the manifest back
    ///
    /// Only the version line changes. No backup is kept.
    ///
    /// # Errors
    ///
    /// Propagates load, locate, parse, bump and save failures. Nothing is
    /// written unless every earlier step succeeded.
    fn increment(&self) -> Result<VersionChange, ReleaseError> {
        let mut document = self.load()?;
        let (index, line) = document.version_line()?;
        let next = line.version().bump()?;

        document.replace_line(index, line.with_version(next.clone()).render());
        self.save(&document)?;

        Ok(VersionChange {
            previous: line.version().clone(),
            next,
        })
    }
}

impl<T: VersionStore + ?Sized> VersionStore for &T {
    fn load(&self) -> Result<ManifestDocument, ReleaseError> {
        (**self).load()
    }

    fn save(&self, document: &ManifestDocument) -> Result<(), ReleaseError> {
        (**self).save(document)
    }
}

/// Version store backed by a manifest file on disk
#[derive(Debug, Clone)]
pub struct ManifestVersionStore {
    path: PathBuf,
}

impl ManifestVersionStore {
    /// Default manifest location, relative to the working directory
    pub const DEFAULT_PATH: &'static str = "Cargo.toml";

    /// Creates a store for the manifest at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Manifest location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, err: impl fmt::Display) -> ReleaseError {
        ReleaseError::ManifestWrite {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}

impl Default for ManifestVersionStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl VersionStore for ManifestVersionStore {
    fn load(&self) -> Result<ManifestDocument, ReleaseError> {
        tracing::debug!(path = %self.path.display(), "Loading manifest");

        let text = fs::read_to_string(&self.path).map_err(|e| ReleaseError::ManifestRead {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(ManifestDocument::parse(&text))
    }

    fn save(&self, document: &ManifestDocument) -> Result<(), ReleaseError> {
        // Follow symlinks so the rename replaces the real manifest, not the link.
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Write a sibling file, then rename it over the manifest.
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        staged
            .write_all(document.to_text().as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| self.write_error(e))?;

        if let Ok(metadata) = fs::metadata(&target) {
            staged
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| self.write_error(e))?;
        }

        staged
            .persist(&target)
            .map_err(|e| self.write_error(e.error))?;

        tracing::debug!(path = %target.display(), "Manifest written");
        Ok(())
    }
}
