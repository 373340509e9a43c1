//! Resolution of the addons configuration against the source tree

use super::document::{Section, parse_sections};
use super::registry::{Assignments, Registrations};
use crate::{Environment, ManifestSet, Result, Settings, SourceKey};
use addons_fs::{SourceTree, io};
use std::collections::{BTreeMap, BTreeSet};

/// How a resolution pass treats ONLY clauses and missing addons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Skip sections whose ONLY clause does not match the environment.
    ///
    /// When `false`, every section applies and special sources a section
    /// omits are treated as if declared with a catch-all pattern.
    pub filtered: bool,
    /// Fail if any pattern matched nothing or any matched directory has no
    /// manifest.
    pub strict: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            filtered: true,
            strict: false,
        }
    }
}

impl ResolveOptions {
    pub fn unfiltered(mut self) -> Self {
        self.filtered = false;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Resolves which addon each source contributes to the build.
///
/// Nothing is cached: every call to [`AddonsResolver::resolve`] reads the
/// configuration and scans the source tree again.
#[derive(Debug, Clone)]
pub struct AddonsResolver<E> {
    tree: SourceTree,
    manifests: ManifestSet,
    env: E,
}

impl<E: Environment> AddonsResolver<E> {
    pub fn new(tree: SourceTree, manifests: ManifestSet, env: E) -> Self {
        Self {
            tree,
            manifests,
            env,
        }
    }

    /// Create a resolver for the tree and platform version in `settings`.
    pub fn from_settings(settings: &Settings, env: E) -> Self {
        Self::new(settings.tree.clone(), settings.manifests(), env)
    }

    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    /// Read the configuration sections.
    ///
    /// A missing configuration file has no sections.
    pub fn load_sections(&self) -> Result<Vec<Section>> {
        let path = self.tree.addons_config();
        match io::read_optional_text(&path)? {
            Some(content) => parse_sections(&content, &path),
            None => {
                tracing::debug!(?path, "Could not find addons configuration");
                Ok(Vec::new())
            }
        }
    }

    /// Expand and validate every applicable section.
    ///
    /// Returns the registrations before the special-source fallback,
    /// together with the special sources no processed section mentioned.
    pub fn register(&self, options: ResolveOptions) -> Result<(Registrations, BTreeSet<SourceKey>)> {
        let mut registrations = Registrations::new();
        let mut unseen: BTreeSet<SourceKey> = SourceKey::specials().into_iter().collect();

        for section in self.load_sections()? {
            let section = if !options.filtered {
                section.with_catch_all_specials()
            } else if !section.applies(&self.env) {
                if let Some(only) = &section.only {
                    tracing::debug!(%only, "Skipping section with ONLY");
                }
                continue;
            } else {
                section
            };

            for (source, patterns) in section.sources {
                tracing::debug!(%source, "Processing repo");
                unseen.remove(&source);
                self.register_patterns(&source, &patterns, &mut registrations);
            }
        }

        Ok((registrations, unseen))
    }

    fn register_patterns(
        &self,
        source: &SourceKey,
        patterns: &[String],
        registrations: &mut Registrations,
    ) {
        let base = self.tree.source_dir(source.as_str());
        for pattern in patterns {
            let full_glob = base.join(pattern);
            tracing::debug!(%full_glob, "Expanding glob");
            let found = match addons_fs::expand(&base, pattern) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(error = %e, "Treating invalid glob as unexpandable");
                    Vec::new()
                }
            };
            if found.is_empty() {
                tracing::debug!(%full_glob, "Skipping unexpandable glob");
                registrations.record_missing_glob(full_glob);
                continue;
            }

            for dir in found {
                if !self.manifests.is_addon(&dir) {
                    tracing::debug!(dir = %dir.display(), "Skipping as it is not a valid module");
                    registrations.record_missing_manifest(dir);
                    continue;
                }
                let Some(name) = dir.file_name() else {
                    continue;
                };
                tracing::debug!(dir = %dir.display(), "Registering addon");
                registrations.register(name.to_string_lossy(), source.clone());
            }
        }
    }

    /// Resolve the owning source of every addon.
    ///
    /// # Errors
    ///
    /// Fails when the configuration cannot be read or parsed, and in strict
    /// mode when anything declared is missing. Ambiguous ownership is
    /// reported by the returned iterator when the addon is reached.
    pub fn resolve(&self, options: ResolveOptions) -> Result<Assignments> {
        let (mut registrations, unseen) = self.register(options)?;

        if options.strict {
            registrations.check_strict()?;
        }

        for source in unseen {
            tracing::debug!(%source, "Auto-adding all addons");
            let dir = self.tree.source_dir(source.as_str()).to_native();
            for addon in io::list_subdirs(&dir)? {
                if let Some(name) = addon.file_name() {
                    registrations.register(name.to_string_lossy(), source.clone());
                }
            }
        }

        tracing::debug!(addons = ?registrations.addons(), "Resulting configuration");
        Ok(registrations.into_assignments())
    }

    /// Resolve and collect every assignment.
    ///
    /// # Errors
    ///
    /// As [`AddonsResolver::resolve`], plus the first ambiguous addon.
    pub fn resolve_all(&self, options: ResolveOptions) -> Result<BTreeMap<String, SourceKey>> {
        self.resolve(options)?.collect()
    }
}
