//! The value returned by every resolution.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ResolveError;

/// Outcome of resolving one resource identifier.
///
/// A result is in exactly one of three states:
/// - success: `requested_path` is set and `absolute_path` is present,
/// - error: `requested_path` is set and `error` is present,
/// - empty: nothing was requested and both are absent.
///
/// The fields are private so a result can only be built through the
/// factories, each of which checks these invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    requested_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    absolute_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ResolveError>,
}

impl ResolutionResult {
    /// Build a successful result.
    pub fn make_success(
        requested_path: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
    ) -> Result<Self, ResolveError> {
        let requested_path = requested_path.into();
        let absolute_path = absolute_path.into();
        if requested_path.is_empty() {
            return Err(invalid_argument("requested path cannot be empty"));
        }
        if absolute_path.as_os_str().is_empty() {
            return Err(invalid_argument("absolute path cannot be empty"));
        }
        Ok(Self::checked(requested_path, Some(absolute_path), None))
    }

    /// Build a failed result.
    pub fn make_error(
        requested_path: impl Into<String>,
        error: ResolveError,
    ) -> Result<Self, ResolveError> {
        let requested_path = requested_path.into();
        if requested_path.is_empty() {
            return Err(invalid_argument("requested path cannot be empty"));
        }
        if matches!(error, ResolveError::EmptyResult) {
            return Err(invalid_argument(
                "an empty-result error cannot describe a request",
            ));
        }
        if error.to_string().is_empty() {
            return Err(invalid_argument("error message cannot be empty"));
        }
        Ok(Self::checked(requested_path, None, Some(error)))
    }

    /// Build the "no resource was requested" result.
    pub fn make_empty() -> Self {
        Self::checked(String::new(), None, None)
    }

    /// Success path used by the resolver, where inputs are already known to be valid.
    pub(crate) fn found(requested_path: &str, absolute_path: PathBuf) -> Self {
        Self::checked(requested_path.to_string(), Some(absolute_path), None)
    }

    /// Failure path used by the resolver, where inputs are already known to be valid.
    pub(crate) fn failed(requested_path: &str, error: ResolveError) -> Self {
        Self::checked(requested_path.to_string(), None, Some(error))
    }

    fn checked(
        requested_path: String,
        absolute_path: Option<PathBuf>,
        error: Option<ResolveError>,
    ) -> Self {
        let result = Self {
            requested_path,
            absolute_path,
            error,
        };
        result.check_invariants();
        result
    }

    fn check_invariants(&self) {
        if self.requested_path.is_empty() {
            assert!(
                self.absolute_path.is_none() && self.error.is_none(),
                "an empty result must carry neither a path nor an error"
            );
        } else {
            assert!(
                self.absolute_path.is_some() != self.error.is_some(),
                "result for '{}' must carry exactly one of a path or an error",
                self.requested_path
            );
        }
        assert!(
            self.absolute_path
                .as_ref()
                .is_none_or(|path| !path.as_os_str().is_empty()),
            "absolute path cannot be empty"
        );
        assert!(
            self.error
                .as_ref()
                .is_none_or(|error| !error.to_string().is_empty()),
            "error message cannot be empty"
        );
    }

    /// The identifier that was requested (empty for the empty result).
    pub fn requested_path(&self) -> &str {
        &self.requested_path
    }

    /// The resolved path, if resolution succeeded.
    pub fn absolute_path(&self) -> Option<&Path> {
        self.absolute_path.as_deref()
    }

    /// The resolved path, or the error explaining why there is none.
    ///
    /// The empty result fails with [`ResolveError::EmptyResult`].
    pub fn absolute_path_or_fail(&self) -> Result<PathBuf, ResolveError> {
        if let Some(path) = &self.absolute_path {
            return Ok(path.clone());
        }
        Err(self.error.clone().unwrap_or(ResolveError::EmptyResult))
    }

    /// The error message; `None` on success.
    pub fn error_message(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.to_string());
        }
        if self.absolute_path.is_some() {
            return None;
        }
        Some(ResolveError::EmptyResult.to_string())
    }

    /// The structured error, if resolution failed.
    pub const fn error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }

    pub const fn is_success(&self) -> bool {
        self.absolute_path.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.requested_path.is_empty()
    }
}

fn invalid_argument(reason: &str) -> ResolveError {
    ResolveError::InvalidArgument {
        reason: reason.to_string(),
    }
}
