//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for resource lookup.
///
/// Global options reshape the resolver configuration; the subcommand decides
/// what to do with it.
#[derive(Debug, Parser)]
#[command(name = "pkgres")]
#[command(about = "Locate namespaced resource files")]
#[command(version)]
pub struct Cli {
    /// Namespace identifiers must start with (also renames the override
    /// variable, sentinel and marker library)
    #[arg(long, global = true, env = "PKGRES_NAMESPACE")]
    pub namespace: Option<String>,

    /// Fail on identifiers that name directories instead of warning
    #[arg(long = "reject-directories", global = true)]
    pub reject_directories: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
