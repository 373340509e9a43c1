//! Filesystem primitives for the addons resolver
//!
//! Provides the source tree layout, glob expansion against a source
//! directory and the small set of I/O helpers the resolver and linker need.

pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;
pub mod pattern;

pub use constants::SourcePath;
pub use error::{Error, Result};
pub use layout::SourceTree;
pub use path::NormalizedPath;
pub use pattern::expand;
