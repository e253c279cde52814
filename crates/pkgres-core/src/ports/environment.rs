//! Environment variable port.

use std::ffi::OsString;

/// Read-only view of environment variables.
#[cfg_attr(test, mockall::automock)]
pub trait Environment: Send + Sync {
    /// The raw value of `name`, or `None` if it is unset.
    ///
    /// Values need not be unicode; they usually name paths.
    fn var_os(&self, name: &str) -> Option<OsString>;
}
