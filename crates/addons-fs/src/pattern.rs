//! Shell-style glob expansion relative to a source directory

use crate::{Error, NormalizedPath, Result};
use glob::{MatchOptions, Pattern};
use std::path::PathBuf;

/// Options matching POSIX shell globbing: case sensitive, `*` never
/// crosses a separator and hidden entries need a literal leading dot.
const SHELL_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand `pattern` against `base`.
///
/// Metacharacters in `base` itself are escaped, so only `pattern` is
/// interpreted. Returns the sorted list of existing matches, which is empty
/// when nothing matched. Entries that cannot be read while walking are
/// skipped, like a shell would.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if `pattern` is not a valid glob.
pub fn expand(base: &NormalizedPath, pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped = NormalizedPath::new(Pattern::escape(base.as_str())).join(pattern);
    let paths = glob::glob_with(escaped.as_str(), SHELL_OPTIONS).map_err(|e| {
        Error::InvalidPattern {
            pattern: base.join(pattern).to_string(),
            message: e.msg.to_string(),
        }
    })?;

    let mut found = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => found.push(path),
            Err(e) => tracing::debug!(path = %e.path().display(), "Skipping unreadable glob match"),
        }
    }
    found.sort();
    Ok(found)
}
