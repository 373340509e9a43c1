//! Link the resolved addons into the auto-addons directory

use addons_core::{Environment, Linker, Settings};
use colored::Colorize;

use crate::cli::ResolveArgs;
use crate::error::Result;

/// Run the link command
///
/// `clean` is combined with the `CLEAN` setting.
pub fn run_link(settings: &Settings, env: &dyn Environment, args: ResolveArgs, clean: bool) -> Result<()> {
    let assignments = super::resolver(settings, env).resolve(args.into())?;
    let report = Linker::new(&settings.tree).link(assignments, clean || settings.clean)?;

    if report.removed > 0 {
        println!("{} {} previous entries", "Removed".yellow(), report.removed);
    }
    println!(
        "{} {} addons into {}",
        "Linked".green().bold(),
        report.linked.len(),
        settings.tree.auto_addons_dir()
    );
    Ok(())
}
