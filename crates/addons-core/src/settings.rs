//! Build settings read from the environment

use crate::{Environment, Error, ManifestSet, Result};
use addons_fs::SourceTree;
use tracing::Level;

/// Variable holding the platform version
pub const VERSION_VAR: &str = "ODOO_VERSION";
/// Variable asking to wipe previous build output
pub const CLEAN_VAR: &str = "CLEAN";
/// Variable asking to install addon requirements automatically
pub const AUTO_REQUIREMENTS_VAR: &str = "AUTO_REQUIREMENTS";
/// Variable selecting log verbosity
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Level names accepted in [`LOG_LEVEL_VAR`]
pub const LOG_LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARNING", "ERROR"];

/// Settings shared by every build step.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Platform version; selects the manifest filenames
    pub version: f64,
    pub clean: bool,
    /// Whether later build steps install each addon's own requirements
    pub auto_requirements: bool,
    /// Verbosity for the build log
    pub log_level: Level,
    /// The raw `LOG_LEVEL` value when it could not be understood
    pub invalid_log_level: Option<String>,
    pub tree: SourceTree,
}

impl Settings {
    /// Read settings from `env`, using the default source tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] when `ODOO_VERSION` is unset or
    /// not a number: nothing can be resolved without it.
    pub fn from_env(env: &dyn Environment) -> Result<Self> {
        let raw_version = env.var(VERSION_VAR);
        let version = raw_version
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .ok_or_else(|| Error::InvalidVersion {
                value: raw_version.clone(),
            })?;

        let raw_level = env.var(LOG_LEVEL_VAR).unwrap_or_default();
        let (log_level, invalid_log_level) = match parse_log_level(&raw_level) {
            Some(level) => (level, None),
            None => (Level::INFO, Some(raw_level)),
        };

        Ok(Self {
            version,
            clean: is_true(env, CLEAN_VAR),
            auto_requirements: is_true(env, AUTO_REQUIREMENTS_VAR),
            log_level,
            invalid_log_level,
            tree: SourceTree::default(),
        })
    }

    /// Replace the source tree, e.g. to point at a checkout outside the image.
    pub fn with_tree(mut self, tree: SourceTree) -> Self {
        self.tree = tree;
        self
    }

    pub fn manifests(&self) -> ManifestSet {
        ManifestSet::for_version(self.version)
    }
}

fn is_true(env: &dyn Environment, key: &str) -> bool {
    env.var(key).as_deref() == Some("true")
}

/// Parse a `LOG_LEVEL` value.
///
/// Accepts numeric thresholds (10 debug, 20 info, 30 warning, 40 error; a
/// value between two levels shows only the higher one, 0 shows everything)
/// and the names in [`LOG_LEVELS`]. An empty value
/// means INFO. Returns `None` for anything else.
pub fn parse_log_level(raw: &str) -> Option<Level> {
    if raw.is_empty() {
        return Some(Level::INFO);
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        let numeric: u64 = raw.parse().ok()?;
        return Some(match numeric {
            0 => Level::TRACE,
            1..=10 => Level::DEBUG,
            11..=20 => Level::INFO,
            21..=30 => Level::WARN,
            _ => Level::ERROR,
        });
    }
    match raw {
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARNING" => Some(Level::WARN),
        "ERROR" => Some(Level::ERROR),
        _ => None,
    }
}
