//! CLI entry point - the composition root.
//!
//! Loads `.env`, configures logging, builds the resolver from the flags and
//! dispatches to a handler. Any error exits with status 1.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pkgres_cli::{Cli, Commands, build_resolver, handlers};

fn main() -> anyhow::Result<()> {
    // Load environment variables (PKG_RESOURCE_ROOT, RUNFILES_DIR, ...)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let resolver = build_resolver(&cli)?;

    match &cli.command {
        Commands::Find { identifier, json } => {
            handlers::find::execute(&resolver, identifier, *json)?;
        }
        Commands::Roots { json } => {
            handlers::roots::execute(&resolver, *json)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins unless `--verbose` asks for debug output; default is `warn`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
