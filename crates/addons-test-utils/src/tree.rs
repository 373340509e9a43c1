//! [`TestTree`] builder for addon resolution scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manifest filename written by [`TestTree::addon`]
pub const MANIFEST: &str = "__manifest__.py";

/// Manifest filename written by [`TestTree::legacy_addon`]
pub const LEGACY_MANIFEST: &str = "__openerp__.py";

/// A temporary custom directory laid out like a build image:
///
/// ```text
/// <root>/src/addons.yaml
/// <root>/src/<source>/<addon>/__manifest__.py
/// <root>/auto/addons/
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use addons_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.addon("private", "mymodule")
///     .addon("odoo/addons", "sale")
///     .config("private: [mymodule]\n");
/// tree.assert_exists("src/private/mymodule/__manifest__.py");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary custom directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The custom directory root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The `src` directory holding one subdirectory per source.
    pub fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    /// The directory used as link target in tests.
    pub fn auto_addons(&self) -> PathBuf {
        self.root().join("auto/addons")
    }

    /// Create `src/<source>/<name>` with a current manifest.
    pub fn addon(&self, source: &str, name: &str) -> &Self {
        self.addon_with_manifest(source, name, MANIFEST)
    }

    /// Create `src/<source>/<name>` with a legacy manifest.
    pub fn legacy_addon(&self, source: &str, name: &str) -> &Self {
        self.addon_with_manifest(source, name, LEGACY_MANIFEST)
    }

    /// Create `src/<source>/<name>` without any manifest.
    pub fn plain_dir(&self, source: &str, name: &str) -> &Self {
        fs::create_dir_all(self.src().join(source).join(name))
            .unwrap_or_else(|e| panic!("TestTree::plain_dir: failed to create {source}/{name}: {e}"));
        self
    }

    /// Write `src/addons.yaml`.
    pub fn config(&self, content: &str) -> &Self {
        self.config_named("addons.yaml", content)
    }

    /// Write the configuration under another file name, e.g. `addons.yml`.
    pub fn config_named(&self, file_name: &str, content: &str) -> &Self {
        fs::create_dir_all(self.src()).unwrap();
        fs::write(self.src().join(file_name), content)
            .unwrap_or_else(|e| panic!("TestTree::config_named: failed to write {file_name}: {e}"));
        self
    }

    fn addon_with_manifest(&self, source: &str, name: &str, manifest: &str) -> &Self {
        let dir = self.src().join(source).join(name);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("TestTree: failed to create {}: {e}", dir.display()));
        fs::write(dir.join(manifest), "{'name': 'test'}\n")
            .unwrap_or_else(|e| panic!("TestTree: failed to write manifest in {}: {e}", dir.display()));
        self
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if something exists at the path,
    /// including a dangling symlink.
    pub fn assert_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            fs::symlink_metadata(&full_path).is_err(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }
}
