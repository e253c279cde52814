//! Resource-path resolution for `pkg/`-namespaced data files.
//!
//! Given a logical identifier such as `pkg/common/readme.txt`, a [`Resolver`]
//! finds the absolute path of that file in whichever layout the program is
//! running from:
//!
//! 1. a root named by the `PKG_RESOURCE_ROOT` environment variable,
//! 2. a runtime archive (runfiles) bundled with the program,
//! 3. an installed tree found next to the loaded `libpkg_marker.so`.
//!
//! Roots from (1) and (3) must contain a sentinel file before they are
//! trusted. Every lookup returns a [`ResolutionResult`] that is either a
//! path or a self-describing error.
//!
//! ```no_run
//! let path = pkgres_core::find_resource_or_fail("pkg/common/readme.txt")?;
//! println!("{}", path.display());
//! # Ok::<(), pkgres_core::ResolveError>(())
//! ```

#![deny(unused_crate_dependencies)]

pub mod adapters;
pub mod config;
pub mod error;
pub mod ports;
pub mod resolver;
pub mod result;
pub mod warnings;

use std::path::PathBuf;

pub use config::{
    DEFAULT_MARKER_LIBRARY, DEFAULT_NAMESPACE, DEFAULT_ROOT_ENV_VAR, DEFAULT_SENTINEL_RELPATH,
    DirectoryPolicy, ResolverConfig, RootStrategy,
};
pub use error::{ConfigError, EMPTY_RESULT_MESSAGE, ResolveError};
pub use resolver::{ProbeStatus, Resolver, ResolverBuilder, RootCandidate, RootProbe, RootProbes};
pub use result::ResolutionResult;
pub use warnings::WarningRegistry;

/// Resolve `identifier` against the current process environment.
///
/// Builds a fresh [`Resolver::from_process`] on every call, so changes to
/// the environment are always observed.
pub fn find_resource(identifier: &str) -> ResolutionResult {
    Resolver::from_process().resolve(identifier)
}

/// Like [`find_resource`], but returns the error instead of a result value.
pub fn find_resource_or_fail(identifier: &str) -> Result<PathBuf, ResolveError> {
    find_resource(identifier).absolute_path_or_fail()
}
