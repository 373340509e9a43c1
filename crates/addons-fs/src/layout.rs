//! Source tree layout
//!
//! Knows where the sources, the addons configuration file and the
//! auto-addons link directory live, rooted at an overridable custom dir.

use crate::constants::{CONFIG_EXTENSIONS, SourcePath};
use crate::NormalizedPath;
use std::path::PathBuf;

/// Locations consumed and produced while resolving addons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    custom_dir: NormalizedPath,
    auto_addons_dir: NormalizedPath,
}

impl Default for SourceTree {
    fn default() -> Self {
        Self {
            custom_dir: NormalizedPath::new(SourcePath::CustomDir.as_str()),
            auto_addons_dir: NormalizedPath::new(SourcePath::AutoAddonsDir.as_str()),
        }
    }
}

impl SourceTree {
    /// Create a layout rooted at `custom_dir`.
    ///
    /// The auto-addons directory keeps its default location; use
    /// [`SourceTree::with_auto_addons_dir`] to move it.
    pub fn new(custom_dir: impl Into<PathBuf>) -> Self {
        Self {
            custom_dir: NormalizedPath::new(custom_dir.into()),
            ..Self::default()
        }
    }

    /// Override the directory receiving addon links.
    pub fn with_auto_addons_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.auto_addons_dir = NormalizedPath::new(dir.into());
        self
    }

    pub fn custom_dir(&self) -> &NormalizedPath {
        &self.custom_dir
    }

    /// The root of all sources, one subdirectory per source key.
    pub fn src_dir(&self) -> NormalizedPath {
        self.custom_dir.join(SourcePath::SrcDir.as_str())
    }

    /// The directory holding the addons of source `key`.
    pub fn source_dir(&self, key: &str) -> NormalizedPath {
        self.src_dir().join(key)
    }

    /// The addons configuration file.
    ///
    /// `addons.yaml` is preferred; `addons.yml` is returned otherwise,
    /// whether or not it exists.
    pub fn addons_config(&self) -> PathBuf {
        let base = self.src_dir().join(SourcePath::AddonsConfig.as_str());
        let [yaml, yml] =
            CONFIG_EXTENSIONS.map(|ext| NormalizedPath::new(format!("{base}.{ext}")));
        if yaml.is_file() {
            yaml.to_native()
        } else {
            yml.to_native()
        }
    }

    /// The list of system packages needed only while building.
    pub fn apt_build_file(&self) -> NormalizedPath {
        self.custom_dir.join(SourcePath::AptBuildFile.as_str())
    }

    /// The directory receiving one link per selected addon.
    pub fn auto_addons_dir(&self) -> &NormalizedPath {
        &self.auto_addons_dir
    }
}
