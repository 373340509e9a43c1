//! Source keys identify where an addon physically lives

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A source of addons: one subdirectory of the source tree.
///
/// The two special sources always exist. Any other key names a third-party
/// repository checked out next to them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKey {
    /// Addons developed for this deployment; the strongest claim
    Private,
    /// Addons shipped with the platform itself; the weakest claim
    Core,
    /// A named third-party repository
    Repo(String),
}

impl SourceKey {
    /// Configuration key and directory of private addons
    pub const PRIVATE: &'static str = "private";
    /// Configuration key and directory of core addons
    pub const CORE: &'static str = "odoo/addons";

    /// The special sources, which fall back to including every addon when
    /// no configuration section mentions them.
    pub fn specials() -> [SourceKey; 2] {
        [SourceKey::Private, SourceKey::Core]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Private => Self::PRIVATE,
            Self::Core => Self::CORE,
            Self::Repo(name) => name,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Self::Private | Self::Core)
    }
}

impl From<&str> for SourceKey {
    fn from(s: &str) -> Self {
        match s {
            Self::PRIVATE => Self::Private,
            Self::CORE => Self::Core,
            other => Self::Repo(other.to_string()),
        }
    }
}

impl From<String> for SourceKey {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::PRIVATE => Self::Private,
            Self::CORE => Self::Core,
            _ => Self::Repo(s),
        }
    }
}

impl FromStr for SourceKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SourceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
