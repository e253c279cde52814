//! Compatibility shims for older resource layouts.
//!
//! Two behaviours live here. Identifiers naming directories are accepted
//! (with a one-time deprecation warning) unless the policy rejects them, and
//! identifiers under relocated legacy directories are retried inside the
//! attic subtree when the runtime archive cannot find them.

use std::path::PathBuf;

use super::Resolver;
use crate::config::DirectoryPolicy;
use crate::error::ResolveError;
use crate::result::ResolutionResult;

/// Deprecation notice for an identifier that names a directory.
pub(super) fn deprecated_directory_message(identifier: &str) -> String {
    format!(
        "Using resource lookup to locate a directory (e.g., '{identifier}') is deprecated and \
         will become an error. Always request a file within the directory instead, e.g., \
         '{identifier}/package.xml', not '{identifier}'."
    )
}

impl Resolver {
    /// Apply the directory policy to an existing directory `abspath`.
    pub(super) fn accept_directory(&self, identifier: &str, abspath: PathBuf) -> ResolutionResult {
        match self.config.directory_policy {
            DirectoryPolicy::AllowWithWarning => {
                self.warnings
                    .warn_once(&deprecated_directory_message(identifier));
                ResolutionResult::found(identifier, abspath)
            }
            DirectoryPolicy::Reject => ResolutionResult::failed(
                identifier,
                ResolveError::DirectoryResource {
                    identifier: identifier.to_string(),
                    path: abspath,
                },
            ),
        }
    }

    /// Look for `identifier` as a directory beneath the archive's root.
    pub(super) fn archive_directory_fallback(&self, identifier: &str) -> Option<ResolutionResult> {
        let archive_root = match self.archive_root() {
            Ok(root) => root,
            Err(reason) => {
                tracing::debug!("Skipping directory lookup for '{}': {}", identifier, reason);
                return None;
            }
        };

        let abspath = archive_root.join(identifier);
        self.filesystem
            .is_dir(&abspath)
            .then(|| self.accept_directory(identifier, abspath))
    }

    /// Retry a relocated legacy identifier inside the attic subtree.
    ///
    /// Prefixes match as plain string prefixes of the path below the
    /// namespace. Failures are silent; the caller reports the original error.
    pub(super) fn attic_fallback(&self, identifier: &str) -> Option<PathBuf> {
        let prefix = self.config.namespace_prefix();
        let remainder = identifier.strip_prefix(&prefix)?;
        let relocated = self
            .config
            .attic_prefixes
            .iter()
            .any(|legacy| remainder.starts_with(legacy.as_str()));
        if !relocated {
            return None;
        }

        let attic_identifier = format!("{prefix}{}/{remainder}", self.config.attic_dir);
        match self.archive.resolve(&attic_identifier) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!("Attic lookup of '{}' failed: {}", attic_identifier, e);
                None
            }
        }
    }
}
