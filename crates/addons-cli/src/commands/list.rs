//! List the resolved addons

use addons_core::{Environment, SourceKey, Settings};
use std::collections::BTreeMap;

use crate::cli::ResolveArgs;
use crate::error::Result;

/// Run the list command
pub fn run_list(settings: &Settings, env: &dyn Environment, args: ResolveArgs, json: bool) -> Result<()> {
    let addons = super::resolver(settings, env).resolve_all(args.into())?;
    print!("{}", render(&addons, json)?);
    Ok(())
}

/// One `addon<TAB>source` line per addon, or a JSON object.
fn render(addons: &BTreeMap<String, SourceKey>, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(addons)?));
    }
    Ok(addons
        .iter()
        .map(|(addon, source)| format!("{addon}\t{source}\n"))
        .collect())
}
