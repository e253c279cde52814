//! Runtime archive port.
//!
//! A runtime archive bundles data files for a packaged execution environment
//! (for example a runfiles tree) and performs its own root discovery.

use std::path::PathBuf;

/// Lookup facility for resources bundled with the running program.
#[cfg_attr(test, mockall::automock)]
pub trait RuntimeArchive: Send + Sync {
    /// Whether an archive is available at all.
    fn has_archive(&self) -> bool;

    /// Resolve `identifier` to an absolute path.
    ///
    /// The error string is surfaced to callers verbatim, so it should be
    /// self-describing.
    fn resolve(&self, identifier: &str) -> Result<PathBuf, String>;
}
