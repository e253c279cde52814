//! Sentinel validation of a chosen root.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::Resolver;
use crate::error::ResolveError;
use crate::result::ResolutionResult;

/// A directory proposed as the resource root, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootCandidate {
    /// Absolute directory expected to hold the whole resource tree.
    pub root: PathBuf,
    /// Human-readable origin used in error messages.
    pub description: String,
}

impl RootCandidate {
    pub fn new(root: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            description: description.into(),
        }
    }
}

impl Resolver {
    /// Whether `root` carries the sentinel file.
    pub(super) fn has_sentinel(&self, root: &Path) -> bool {
        self.filesystem
            .is_file(&root.join(&self.config.sentinel_relpath))
    }

    /// Root of the runtime archive, recovered from where it keeps the sentinel.
    ///
    /// The archive only resolves files, so the root is the sentinel's path
    /// with the sentinel's relative components removed. `Err` says why no
    /// root could be recovered.
    pub(super) fn archive_root(&self) -> Result<PathBuf, String> {
        let relpath = Path::new(&self.config.sentinel_relpath);
        let sentinel = self
            .archive
            .resolve(&self.config.sentinel_relpath)
            .map_err(|e| format!("sentinel not in archive: {e}"))?;
        if !sentinel.ends_with(relpath) {
            return Err(format!(
                "archive sentinel '{}' does not end with '{}'",
                sentinel.display(),
                relpath.display()
            ));
        }
        let depth = relpath.components().count();
        sentinel
            .ancestors()
            .nth(depth)
            .map(Path::to_path_buf)
            .ok_or_else(|| format!("archive sentinel '{}' has no parent root", sentinel.display()))
    }

    /// Resolve `identifier` beneath a root, after proving the root genuine.
    pub(super) fn check_and_make_result(
        &self,
        candidate: &RootCandidate,
        identifier: &str,
    ) -> ResolutionResult {
        debug_assert!(!candidate.description.is_empty());
        debug_assert!(!identifier.is_empty() && !identifier.starts_with('/'));

        let root = &candidate.root;
        if !self.has_sentinel(root) {
            return ResolutionResult::failed(
                identifier,
                ResolveError::SentinelMissing {
                    identifier: identifier.to_string(),
                    root_source: candidate.description.clone(),
                    root: root.clone(),
                    sentinel: self.config.sentinel_relpath.clone(),
                },
            );
        }

        let abspath = root.join(identifier);
        if self.filesystem.is_dir(&abspath) {
            return self.accept_directory(identifier, abspath);
        }
        if !self.filesystem.is_file(&abspath) {
            return ResolutionResult::failed(
                identifier,
                ResolveError::ResourceMissing {
                    identifier: identifier.to_string(),
                    root_source: candidate.description.clone(),
                    root: root.clone(),
                    path: abspath,
                },
            );
        }

        ResolutionResult::found(identifier, abspath)
    }
}
