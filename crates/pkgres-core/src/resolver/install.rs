//! Installed-tree discovery via the marker library.

use super::{Resolver, RootCandidate};
use crate::ports::MARKER_CHECK_VALUE;

/// Description used for roots found through the marker library.
pub(super) const INSTALL_ROOT_DESCRIPTION: &str = "install marker";

impl Resolver {
    /// `<marker library dir>/<install_share_relpath>`, if that is a directory.
    ///
    /// # Panics
    ///
    /// Panics if the marker library's liveness check does not return
    /// [`MARKER_CHECK_VALUE`]; the process is linked incorrectly.
    pub(super) fn install_root(&self) -> Result<RootCandidate, String> {
        let check = self.libraries.marker_check();
        assert_eq!(
            check, MARKER_CHECK_VALUE,
            "marker library liveness check returned {check}, expected {MARKER_CHECK_VALUE}"
        );

        let library = &self.config.marker_library;
        let Some(library_dir) = self.libraries.locate(library) else {
            tracing::debug!("Resource lookup has no install candidate ({} not loaded)", library);
            return Err(format!("there is no install marker ({library} is not loaded)"));
        };

        let root = library_dir.join(&self.config.install_share_relpath);
        if self.filesystem.is_dir(&root) {
            return Ok(RootCandidate::new(root, INSTALL_ROOT_DESCRIPTION));
        }

        tracing::debug!(
            "Resource lookup ignoring install candidate '{}' because it does not exist",
            root.display()
        );
        Err(format!(
            "install candidate '{}' does not exist",
            root.display()
        ))
    }
}
