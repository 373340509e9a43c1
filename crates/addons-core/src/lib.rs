//! Addon resolution for build images
//!
//! This crate decides which addon directories take part in a build. It reads
//! the layered `addons.yaml` configuration, expands every declared glob
//! against the source tree, keeps the directories that carry a manifest and
//! picks exactly one owning source per addon:
//!
//! - **Private** sources always win
//! - **Third-party** repositories must claim an addon unambiguously
//! - **Core** addons are the weakest claim
//!
//! # Architecture
//!
//! ```text
//!                 addons-cli
//!                     |
//!                addons-core
//!                     |
//!                 addons-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use addons_core::{AddonsResolver, ProcessEnv, ResolveOptions, Settings};
//!
//! let settings = Settings::from_env(&ProcessEnv)?;
//! let resolver = AddonsResolver::from_settings(&settings, ProcessEnv);
//! for entry in resolver.resolve(ResolveOptions::default())? {
//!     let (addon, source) = entry?;
//!     println!("{addon} {source}");
//! }
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod link;
pub mod manifest;
pub mod settings;
pub mod source;

pub use config::{AddonsResolver, Assignments, OnlyClause, Registrations, ResolveOptions, Section};
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::{Error, Result};
pub use link::{LinkReport, Linker};
pub use manifest::ManifestSet;
pub use settings::Settings;
pub use source::SourceKey;
