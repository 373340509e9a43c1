//! Addons configuration and its resolution
//!
//! The configuration is a YAML file holding one document per section. Each
//! section maps a source key to the glob patterns selecting its addons:
//!
//! ```yaml
//! private: ["*"]
//! OCA/web:
//!   - web_responsive
//!   - web_tree_*
//! ---
//! ONLY:
//!   PGDATABASE: [prod]
//! OCA/server-tools: [auditlog]
//! ```
//!
//! A section carrying an `ONLY` clause applies only when every listed
//! environment variable holds one of the accepted values.
//!
//! Resolution runs in three steps:
//!
//! 1. **Registration** - every applicable section is expanded against the
//!    source tree and each valid addon is registered under its source
//! 2. **Fallback** - special sources no section mentions contribute every
//!    addon they hold
//! 3. **Reconciliation** - each addon gets exactly one owning source

mod document;
mod registry;
mod resolver;

pub use document::{CATCH_ALL, ONLY_KEY, OnlyClause, Section, parse_sections};
pub use registry::{Assignments, Registrations, reconcile};
pub use resolver::{AddonsResolver, ResolveOptions};
