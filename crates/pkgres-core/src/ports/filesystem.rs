//! Filesystem predicate port.

use std::path::Path;

/// Existence checks used to validate roots and resources.
pub trait Filesystem: Send + Sync {
    /// True if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// True if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;
}
