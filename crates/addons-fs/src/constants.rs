//! Constants for the well-known locations of a build tree.

use std::path::Path;

/// Well-known directories and files, relative to their parent in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePath {
    /// Default custom directory holding sources and dependency lists
    CustomDir,
    /// The `src` directory inside the custom directory
    SrcDir,
    /// Basename of the addons configuration file, without extension
    AddonsConfig,
    /// Directory receiving the links to the selected addons
    AutoAddonsDir,
    /// Build-time system packages, relative to the custom directory
    AptBuildFile,
}

impl SourcePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomDir => "/opt/odoo/custom",
            Self::SrcDir => "src",
            Self::AddonsConfig => "addons",
            Self::AutoAddonsDir => "/opt/odoo/auto/addons",
            Self::AptBuildFile => "dependencies/apt_build.txt",
        }
    }
}

/// Extensions tried, in order, for the addons configuration file.
pub const CONFIG_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

impl AsRef<Path> for SourcePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for SourcePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
