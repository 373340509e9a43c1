//! Command implementations for addons-cli

pub mod check;
pub mod link;
pub mod list;

pub use check::run_check;
pub use link::run_link;
pub use list::run_list;

use addons_core::{AddonsResolver, Environment, ResolveOptions, Settings};

use crate::cli::ResolveArgs;

impl From<ResolveArgs> for ResolveOptions {
    fn from(args: ResolveArgs) -> Self {
        Self {
            filtered: !args.unfiltered,
            strict: args.strict,
        }
    }
}

fn resolver<'e>(settings: &Settings, env: &'e dyn Environment) -> AddonsResolver<&'e dyn Environment> {
    AddonsResolver::from_settings(settings, env)
}
