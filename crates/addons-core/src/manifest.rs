//! Manifest files mark a directory as an installable addon

use std::path::Path;

/// Manifest filename of current platform versions
pub const MANIFEST: &str = "__manifest__.py";

/// Manifest filename of platform versions before [`MANIFEST_THRESHOLD`]
pub const LEGACY_MANIFEST: &str = "__openerp__.py";

/// First platform version using [`MANIFEST`]
pub const MANIFEST_THRESHOLD: f64 = 10.0;

/// The manifest filenames recognized for one platform version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSet {
    names: Vec<&'static str>,
}

impl ManifestSet {
    pub fn for_version(version: f64) -> Self {
        let names = if version < MANIFEST_THRESHOLD {
            vec![LEGACY_MANIFEST]
        } else {
            vec![MANIFEST]
        };
        Self { names }
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Whether `dir` contains one of the recognized manifest files.
    pub fn is_addon(&self, dir: &Path) -> bool {
        self.names.iter().any(|name| dir.join(name).is_file())
    }
}
