//! Command-line front end for `pkgres-core`.
//!
//! The binary in `main.rs` is the composition root: it loads `.env`, sets up
//! logging, builds a [`pkgres_core::Resolver`] from the flags and dispatches
//! to a handler.

#![deny(unused_crate_dependencies)]

// Used only by the binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;

pub use bootstrap::{build_resolver, resolver_config};
pub use commands::Commands;
pub use parser::Cli;
