//! Subcommands of the `pkgres` tool.

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a resource identifier to an absolute path
    Find {
        /// Resource identifier (e.g., "pkg/common/readme.txt")
        identifier: String,
        /// Print the full resolution result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which resource root each strategy would use
    Roots {
        /// Print the probes as JSON
        #[arg(long)]
        json: bool,
    },
}
