//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve which addons take part in a build
#[derive(Parser, Debug)]
#[command(name = "addons")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output regardless of LOG_LEVEL
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom directory holding `src/` and the addons configuration
    #[arg(long, global = true, value_name = "DIR")]
    pub custom_dir: Option<PathBuf>,

    /// Directory receiving the addon links
    #[arg(long, global = true, value_name = "DIR")]
    pub auto_addons_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that resolve addons
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveArgs {
    /// Process every section regardless of ONLY clauses
    #[arg(long)]
    pub unfiltered: bool,

    /// Fail if a declared addon is missing or has no manifest
    #[arg(long)]
    pub strict: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print each selected addon and the source it is taken from
    List {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Verify that every declared addon exists and has a manifest
    Check,

    /// Link the selected addons into the auto-addons directory
    ///
    /// Examples:
    ///   addons link            # Add or refresh links
    ///   addons link --clean    # Remove previous links first
    Link {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// Empty the auto-addons directory first (defaults to $CLEAN)
        #[arg(long)]
        clean: bool,
    },
}
