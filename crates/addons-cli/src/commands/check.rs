//! Strict verification of the addons configuration

use addons_core::{Environment, ResolveOptions, Settings};
use colored::Colorize;

use crate::error::Result;

/// Run the check command
///
/// Resolves in strict, filtered mode so that every missing pattern and
/// every manifest-less directory is reported in one go.
pub fn run_check(settings: &Settings, env: &dyn Environment) -> Result<()> {
    let options = ResolveOptions::default().strict();
    let addons = super::resolver(settings, env).resolve_all(options)?;

    println!(
        "{} {} addons resolved from {}",
        "OK".green().bold(),
        addons.len(),
        settings.tree.addons_config().display()
    );
    Ok(())
}
