//! Resolution and configuration error types.
//!
//! Every resolution message names the requested identifier, where the root
//! came from, and which artifact was missing, so callers can diagnose a
//! failure without reading this crate.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Message reported by an empty [`ResolutionResult`](crate::ResolutionResult).
pub const EMPTY_RESULT_MESSAGE: &str = "No resource was requested (empty result)";

/// Errors produced while resolving a resource identifier.
///
/// These are carried as data inside a `ResolutionResult`; they only surface
/// as `Err` through the `*_or_fail` entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveError {
    /// The identifier is absolute or lacks the namespace prefix.
    #[error("Resource path '{identifier}' {reason}.")]
    InvalidIdentifier { identifier: String, reason: String },

    /// No strategy produced a usable resource root.
    #[error(
        "Could not find resource path '{identifier}' because no resource roots of any kind \
         could be found: {}.",
        tried.join(", ")
    )]
    NoRootFound { identifier: String, tried: Vec<String> },

    /// The chosen root does not carry the sentinel file.
    #[error(
        "Could not find resource path '{identifier}' because {root_source} specified a resource \
         root of '{}' but that root did not contain the expected sentinel file '{sentinel}'.",
        root.display()
    )]
    SentinelMissing {
        identifier: String,
        root_source: String,
        root: PathBuf,
        sentinel: String,
    },

    /// The root is valid but the requested file is absent.
    #[error(
        "Could not find resource path '{identifier}' because {root_source} specified a resource \
         root of '{}' but that root did not contain the expected file '{}'.",
        root.display(),
        path.display()
    )]
    ResourceMissing {
        identifier: String,
        root_source: String,
        root: PathBuf,
        path: PathBuf,
    },

    /// The runtime archive could not resolve the identifier; message is verbatim.
    #[error("{message}")]
    ArchiveLookup { identifier: String, message: String },

    /// The identifier names a directory and directories are rejected.
    #[error(
        "Resource path '{identifier}' names the directory '{}'; request a file within the \
         directory instead.",
        path.display()
    )]
    DirectoryResource { identifier: String, path: PathBuf },

    /// Returned for results that never carried a request.
    #[error("{}", EMPTY_RESULT_MESSAGE)]
    EmptyResult,

    /// A result factory was called with malformed input.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl ResolveError {
    /// Stable, machine-readable name of the error category.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier { .. } => "invalid_identifier",
            Self::NoRootFound { .. } => "no_root_found",
            Self::SentinelMissing { .. } => "sentinel_missing",
            Self::ResourceMissing { .. } => "resource_missing",
            Self::ArchiveLookup { .. } => "archive_lookup",
            Self::DirectoryResource { .. } => "directory_resource",
            Self::EmptyResult => "empty_result",
            Self::InvalidArgument { .. } => "invalid_argument",
        }
    }
}

/// Errors found while validating a [`ResolverConfig`](crate::ResolverConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The namespace is empty or contains a separator.
    #[error("Namespace '{0}' must be a single non-empty path segment")]
    InvalidNamespace(String),

    /// The sentinel path is not a relative path under the namespace.
    #[error("Sentinel path '{sentinel}' must be a relative path under '{namespace}/'")]
    InvalidSentinel { sentinel: String, namespace: String },

    /// A required name was left empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// The strategy list lists the same strategy twice.
    #[error("Root strategy {0} is listed more than once")]
    DuplicateStrategy(String),
}
