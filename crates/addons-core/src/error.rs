//! Error types for addons-core

use crate::SourceKey;
use addons_fs::NormalizedPath;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Result type for addons-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving addons
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform version is missing or not a number
    #[error("Invalid ODOO_VERSION {value:?}: expected a number")]
    InvalidVersion { value: Option<String> },

    /// The addons configuration exists but cannot be understood
    #[error("Failed to parse addons configuration at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Strict resolution found declared addons that are not on disk
    #[error("{}", strict_message(.missing_globs, .missing_manifests))]
    Strict {
        missing_globs: BTreeSet<NormalizedPath>,
        missing_manifests: BTreeSet<PathBuf>,
    },

    /// More than one non-core source claims the same addon
    #[error("Addon {addon} defined in several repos {}", join_sources(.sources))]
    Ambiguous {
        addon: String,
        sources: BTreeSet<SourceKey>,
    },

    /// Filesystem error from addons-fs
    #[error(transparent)]
    Fs(#[from] addons_fs::Error),
}

fn strict_message(
    missing_globs: &BTreeSet<NormalizedPath>,
    missing_manifests: &BTreeSet<PathBuf>,
) -> String {
    let mut lines = Vec::new();
    if !missing_globs.is_empty() {
        lines.push("Addons not found:".to_string());
        lines.extend(missing_globs.iter().map(|glob| format!("  {glob}")));
    }
    if !missing_manifests.is_empty() {
        lines.push("Addons without manifest:".to_string());
        lines.extend(
            missing_manifests
                .iter()
                .map(|dir| format!("  {}", dir.display())),
        );
    }
    lines.join("\n")
}

fn join_sources(sources: &BTreeSet<SourceKey>) -> String {
    let names: Vec<_> = sources.iter().map(SourceKey::as_str).collect();
    format!("{{{}}}", names.join(", "))
}
