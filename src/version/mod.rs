//! Version store
//!
//! Locates the `version = "x.y.z"` declaration in a manifest, bumps it and
//! writes the manifest back with every other line untouched.

mod manifest;
mod number;
mod store;

pub use manifest::{ManifestDocument, VERSION_KEY, VersionLine};
pub use number::{CARRY_BASE, Version};
pub use store::{ManifestVersionStore, VersionChange, VersionStore};
