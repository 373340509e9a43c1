//! Shared test utilities for the addons workspace.
//!
//! This crate provides a [`TestTree`] builder for source trees so crate test
//! suites do not each hand-roll directories and manifests. It is a
//! dev-dependency only and never published.

pub mod tree;

pub use tree::TestTree;
