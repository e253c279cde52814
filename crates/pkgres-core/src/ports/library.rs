//! Loaded-library location port.

use std::path::PathBuf;

/// Value a correctly linked marker library reports from its liveness check.
pub const MARKER_CHECK_VALUE: u32 = 1234;

/// Reports where shared libraries of the current process were loaded from.
#[cfg_attr(test, mockall::automock)]
pub trait LibraryLocator: Send + Sync {
    /// Liveness check of the hosting library; must return [`MARKER_CHECK_VALUE`].
    fn marker_check(&self) -> u32;

    /// Directory containing the loaded library named `name`, if it is loaded.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}
