//! Materialize resolved addons as links in the auto-addons directory

use crate::{Result, SourceKey};
use addons_fs::{SourceTree, io};

/// Outcome of a [`Linker::link`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Addon names linked, in link order
    pub linked: Vec<String>,
    /// Entries removed from the auto-addons directory before linking
    pub removed: usize,
}

/// Links each selected addon from its owning source into one directory.
#[derive(Debug, Clone)]
pub struct Linker<'a> {
    tree: &'a SourceTree,
}

impl<'a> Linker<'a> {
    pub fn new(tree: &'a SourceTree) -> Self {
        Self { tree }
    }

    /// Create `auto_addons_dir/<addon>` pointing at `src/<source>/<addon>`
    /// for every assignment.
    ///
    /// All assignments are collected before touching the filesystem, so an
    /// ambiguous addon leaves the directory as it was. With `clean`, the
    /// directory is emptied first.
    pub fn link<I>(&self, assignments: I, clean: bool) -> Result<LinkReport>
    where
        I: IntoIterator<Item = Result<(String, SourceKey)>>,
    {
        let assignments = assignments.into_iter().collect::<Result<Vec<_>>>()?;
        let target_dir = self.tree.auto_addons_dir().to_native();

        let mut report = LinkReport::default();
        if clean {
            report.removed = io::clear_dir(&target_dir)?;
            tracing::debug!(removed = report.removed, dir = %target_dir.display(), "Cleaned auto addons");
        }

        for (addon, source) in assignments {
            let target = self.tree.source_dir(source.as_str()).join(&addon).to_native();
            let link = target_dir.join(&addon);
            tracing::debug!(%addon, %source, "Linking addon");
            io::replace_symlink(&target, &link)?;
            report.linked.push(addon);
        }
        Ok(report)
    }
}
