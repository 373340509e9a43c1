//! Addons CLI
//!
//! Resolves the addons selected by `addons.yaml` and links them for the build.

mod cli;
mod commands;
mod error;

use addons_core::{Environment, ProcessEnv, Settings};
use addons_fs::SourceTree;
use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = ProcessEnv;
    let settings = Settings::from_env(&env)?;
    let settings = apply_paths(settings, &cli);

    init_logging(&settings, cli.verbose);
    execute_command(cli.command, &settings, &env)
}

/// Point the settings at the directories given on the command line.
fn apply_paths(settings: Settings, cli: &Cli) -> Settings {
    if cli.custom_dir.is_none() && cli.auto_addons_dir.is_none() {
        return settings;
    }
    let mut tree = match &cli.custom_dir {
        Some(dir) => SourceTree::new(dir),
        None => settings.tree.clone(),
    };
    if let Some(dir) = &cli.auto_addons_dir {
        tree = tree.with_auto_addons_dir(dir);
    }
    settings.with_tree(tree)
}

fn init_logging(settings: &Settings, verbose: bool) {
    let level = if verbose { Level::DEBUG } else { settings.log_level };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}: could not install logger: {}", "warning".yellow().bold(), e);
    }

    if let Some(raw) = &settings.invalid_log_level {
        tracing::warn!(value = %raw, "Wrong value in $LOG_LEVEL, falling back to INFO");
    }
    tracing::debug!(
        version = settings.version,
        auto_requirements = settings.auto_requirements,
        apt_build = %settings.tree.apt_build_file(),
        "Settings loaded"
    );
}

fn execute_command(cmd: Commands, settings: &Settings, env: &dyn Environment) -> Result<()> {
    match cmd {
        Commands::List { resolve, json } => commands::run_list(settings, env, resolve, json),
        Commands::Check => commands::run_check(settings, env),
        Commands::Link { resolve, clean } => commands::run_link(settings, env, resolve, clean),
    }
}
