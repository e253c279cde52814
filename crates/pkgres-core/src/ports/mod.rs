//! Port definitions (trait abstractions) for ambient process state.
//!
//! Ports define what the resolver needs from the outside world: environment
//! variables, filesystem predicates, a runtime archive and the location of
//! loaded libraries. They contain no implementation details; the default
//! implementations live in [`crate::adapters`].
//!
//! # Design Rules
//!
//! - All ports are `Send + Sync` so a resolver can be shared across threads
//! - Methods are queries only; nothing here mutates process state

mod archive;
mod environment;
mod filesystem;
mod library;

pub use archive::RuntimeArchive;
pub use environment::Environment;
pub use filesystem::Filesystem;
pub use library::{LibraryLocator, MARKER_CHECK_VALUE};

#[cfg(test)]
pub use archive::MockRuntimeArchive;
#[cfg(test)]
pub use environment::MockEnvironment;
#[cfg(test)]
pub use library::MockLibraryLocator;
