//! Parsing of the multi-document addons configuration

use crate::{Environment, Error, Result, SourceKey};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;
use std::path::Path;

/// Reserved section key holding the environment condition
pub const ONLY_KEY: &str = "ONLY";

/// Pattern matching every addon of a source
pub const CATCH_ALL: &str = "*";

/// Environment condition gating a section.
///
/// Each variable maps to its accepted values; `None` accepts the variable
/// being unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnlyClause {
    conditions: Vec<(String, Vec<Option<String>>)>,
}

impl OnlyClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to hold one of `values`.
    pub fn allow<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<String>>,
    {
        self.conditions
            .push((key.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn conditions(&self) -> &[(String, Vec<Option<String>>)] {
        &self.conditions
    }

    /// Whether every condition holds in `env`.
    pub fn matches(&self, env: &dyn Environment) -> bool {
        self.conditions
            .iter()
            .all(|(key, accepted)| accepted.contains(&env.var(key)))
    }
}

impl fmt::Display for OnlyClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: Vec<_> = self
            .conditions
            .iter()
            .map(|(key, values)| {
                let values: Vec<_> = values
                    .iter()
                    .map(|v| v.as_deref().unwrap_or("null"))
                    .collect();
                format!("{key}: [{}]", values.join(", "))
            })
            .collect();
        write!(f, "{{{}}}", conditions.join(", "))
    }
}

/// One document of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub only: Option<OnlyClause>,
    /// Patterns per source, in document order
    pub sources: Vec<(SourceKey, Vec<String>)>,
}

impl Section {
    /// Whether the section applies in `env`. Sections without an ONLY
    /// clause always apply.
    pub fn applies(&self, env: &dyn Environment) -> bool {
        self.only.as_ref().is_none_or(|only| only.matches(env))
    }

    pub fn mentions(&self, key: &SourceKey) -> bool {
        self.sources.iter().any(|(k, _)| k == key)
    }

    /// Add a catch-all pattern for every special source the section omits.
    pub fn with_catch_all_specials(mut self) -> Self {
        for special in SourceKey::specials() {
            if !self.mentions(&special) {
                self.sources.push((special, vec![CATCH_ALL.to_string()]));
            }
        }
        self
    }

    fn from_value(value: Value) -> std::result::Result<Self, String> {
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            other => return Err(format!("expected a mapping, found {}", kind(&other))),
        };

        let mut section = Self::default();
        for (key, value) in mapping {
            let key = match key {
                Value::String(key) => key,
                other => return Err(format!("expected a string key, found {}", kind(&other))),
            };
            if key == ONLY_KEY {
                section.only = Some(parse_only(value)?);
            } else {
                let patterns = parse_patterns(&key, value)?;
                section.sources.push((SourceKey::from(key), patterns));
            }
        }
        Ok(section)
    }
}

/// Parse every document of `content` into a section, in order.
///
/// Empty documents, including a file holding only comments, contribute no
/// section. `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`Error::ConfigParse`] for invalid YAML or for documents that do
/// not have the expected shape.
pub fn parse_sections(content: &str, path: &Path) -> Result<Vec<Section>> {
    let parse_error = |message: String| Error::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    let mut sections = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = Value::deserialize(document).map_err(|e| parse_error(e.to_string()))?;
        if value.is_null() {
            continue;
        }
        let section = Section::from_value(value)
            .map_err(|message| parse_error(format!("document {}: {}", index + 1, message)))?;
        sections.push(section);
    }
    Ok(sections)
}

fn parse_only(value: Value) -> std::result::Result<OnlyClause, String> {
    let mapping = match value {
        Value::Null => return Ok(OnlyClause::new()),
        Value::Mapping(mapping) => mapping,
        other => return Err(format!("{ONLY_KEY} must be a mapping, found {}", kind(&other))),
    };

    let mut only = OnlyClause::new();
    for (key, values) in mapping {
        let key = scalar(&key)
            .flatten()
            .ok_or_else(|| format!("{ONLY_KEY} keys must be variable names"))?;
        let values = match values {
            Value::Sequence(items) => items,
            single => vec![single],
        };
        let accepted = values
            .iter()
            .map(|v| scalar(v).ok_or_else(|| format!("{ONLY_KEY} values of {key} must be scalars")))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        only = only.allow(key, accepted);
    }
    Ok(only)
}

fn parse_patterns(key: &str, value: Value) -> std::result::Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(pattern) => Ok(vec![pattern]),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(pattern) => Ok(pattern),
                other => Err(format!("patterns of {key} must be strings, found {}", kind(&other))),
            })
            .collect(),
        other => Err(format!("patterns of {key} must be a list, found {}", kind(&other))),
    }
}

/// The textual form of a scalar; `Some(None)` for null, `None` for
/// collections.
fn scalar(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::String(s) => Some(Some(s.clone())),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
