//! Registration aggregate and ownership reconciliation

use crate::{Error, Result, SourceKey};
use addons_fs::NormalizedPath;
use std::collections::{BTreeMap, BTreeSet, btree_map};
use std::path::PathBuf;

/// Everything one resolution pass found on disk.
///
/// Addons map to every source that registered them; unexpandable patterns
/// and manifest-less directories are collected rather than reported one
/// by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registrations {
    addons: BTreeMap<String, BTreeSet<SourceKey>>,
    missing_globs: BTreeSet<NormalizedPath>,
    missing_manifests: BTreeSet<PathBuf>,
}

impl Registrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `addon` under `source`. Registering twice is a no-op.
    pub fn register(&mut self, addon: impl Into<String>, source: SourceKey) {
        self.addons.entry(addon.into()).or_default().insert(source);
    }

    pub fn record_missing_glob(&mut self, pattern: NormalizedPath) {
        self.missing_globs.insert(pattern);
    }

    pub fn record_missing_manifest(&mut self, dir: PathBuf) {
        self.missing_manifests.insert(dir);
    }

    pub fn addons(&self) -> &BTreeMap<String, BTreeSet<SourceKey>> {
        &self.addons
    }

    pub fn missing_globs(&self) -> &BTreeSet<NormalizedPath> {
        &self.missing_globs
    }

    pub fn missing_manifests(&self) -> &BTreeSet<PathBuf> {
        &self.missing_manifests
    }

    /// Fail with every discoverability problem at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Strict`] when any pattern matched nothing or any
    /// matched directory lacked a manifest.
    pub fn check_strict(&self) -> Result<()> {
        if self.missing_globs.is_empty() && self.missing_manifests.is_empty() {
            return Ok(());
        }
        Err(Error::Strict {
            missing_globs: self.missing_globs.clone(),
            missing_manifests: self.missing_manifests.clone(),
        })
    }

    /// Turn the registrations into the final, lazily reconciled assignment.
    pub fn into_assignments(self) -> Assignments {
        Assignments {
            inner: self.addons.into_iter(),
        }
    }
}

/// Pick the owning source of `addon` among the sources that registered it.
///
/// Private wins over everything; core alone keeps core; otherwise core is
/// discarded and exactly one source must remain.
///
/// # Errors
///
/// Returns [`Error::Ambiguous`] when two or more non-core sources claim the
/// addon and none of them is private.
pub fn reconcile(addon: &str, mut sources: BTreeSet<SourceKey>) -> Result<SourceKey> {
    if sources.contains(&SourceKey::Private) {
        return Ok(SourceKey::Private);
    }
    if sources.len() == 1 && sources.contains(&SourceKey::Core) {
        return Ok(SourceKey::Core);
    }
    sources.remove(&SourceKey::Core);
    if sources.len() != 1 {
        return Err(Error::Ambiguous {
            addon: addon.to_string(),
            sources,
        });
    }
    sources.pop_first().ok_or_else(|| Error::Ambiguous {
        addon: addon.to_string(),
        sources: BTreeSet::new(),
    })
}

/// Final assignment of each addon to one source, in addon name order.
///
/// Reconciliation happens as the iterator advances, so an ambiguous addon
/// surfaces as an `Err` item once reached.
#[derive(Debug)]
pub struct Assignments {
    inner: btree_map::IntoIter<String, BTreeSet<SourceKey>>,
}

impl Iterator for Assignments {
    type Item = Result<(String, SourceKey)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (addon, sources) = self.inner.next()?;
        Some(reconcile(&addon, sources).map(|source| (addon, source)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
