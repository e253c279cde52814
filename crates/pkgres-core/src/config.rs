//! Resolver configuration.
//!
//! Everything that shapes resolution lives here as plain data: the namespace,
//! the override variable, the sentinel, the ordered root strategies and the
//! relocated legacy prefixes. This keeps the resolver free of inline constants
//! and lets tests drive it from tables.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default top-level namespace every identifier must start with.
pub const DEFAULT_NAMESPACE: &str = "pkg";

/// Default environment variable naming a resource root.
pub const DEFAULT_ROOT_ENV_VAR: &str = "PKG_RESOURCE_ROOT";

/// Default sentinel file, relative to a resource root.
pub const DEFAULT_SENTINEL_RELPATH: &str = "pkg/.pkg-find_resource-sentinel";

/// Default marker library used to find an installed tree.
pub const DEFAULT_MARKER_LIBRARY: &str = "libpkg_marker.so";

/// Default location of the resource root relative to the marker library's directory.
pub const DEFAULT_INSTALL_SHARE_RELPATH: &str = "../share";

/// Default name of the subtree holding relocated legacy resources.
pub const DEFAULT_ATTIC_DIR: &str = "attic";

/// Legacy directories (relative to the namespace) that moved into the attic.
pub const DEFAULT_ATTIC_PREFIXES: &[&str] = &[
    "multibody/collision/test",
    "multibody/parsers/test/package_map_test",
    "multibody/parsers/test/parsers_frames_test",
    "multibody/parsers/test/urdf_parser_test",
    "multibody/rigid_body_plant/test",
    "multibody/shapes/test",
    "multibody/test",
    "systems/controllers/qp_inverse_dynamics/test",
];

/// A way of discovering the resource root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootStrategy {
    /// A directory named by an environment variable.
    EnvironmentOverride,
    /// A bundled runtime archive that resolves identifiers itself.
    RuntimeArchive,
    /// `<marker library dir>/../share` of an installed tree.
    InstalledTree,
}

impl RootStrategy {
    /// Default priority order.
    pub const DEFAULT_ORDER: [Self; 3] = [
        Self::EnvironmentOverride,
        Self::RuntimeArchive,
        Self::InstalledTree,
    ];
}

impl fmt::Display for RootStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EnvironmentOverride => "environment_override",
            Self::RuntimeArchive => "runtime_archive",
            Self::InstalledTree => "installed_tree",
        };
        f.write_str(name)
    }
}

/// What to do when an identifier names a directory rather than a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryPolicy {
    /// Accept the directory and emit a one-time deprecation warning.
    #[default]
    AllowWithWarning,
    /// Fail with [`ResolveError::DirectoryResource`](crate::ResolveError::DirectoryResource).
    Reject,
}

/// Configuration for a [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// First path segment every identifier must carry.
    pub namespace: String,
    /// Environment variable that may name a resource root.
    pub root_env_var: String,
    /// Marker file whose presence proves a root is genuine.
    pub sentinel_relpath: String,
    /// Shared library whose location identifies an installed tree.
    pub marker_library: String,
    /// Resource root relative to the marker library's directory.
    pub install_share_relpath: String,
    /// Subtree (under the namespace) holding relocated legacy resources.
    pub attic_dir: String,
    /// Legacy prefixes, relative to the namespace, that moved into the attic.
    pub attic_prefixes: Vec<String>,
    /// Root strategies in priority order.
    pub strategies: Vec<RootStrategy>,
    /// Handling of identifiers that name directories.
    pub directory_policy: DirectoryPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            root_env_var: DEFAULT_ROOT_ENV_VAR.to_string(),
            sentinel_relpath: DEFAULT_SENTINEL_RELPATH.to_string(),
            marker_library: DEFAULT_MARKER_LIBRARY.to_string(),
            install_share_relpath: DEFAULT_INSTALL_SHARE_RELPATH.to_string(),
            attic_dir: DEFAULT_ATTIC_DIR.to_string(),
            attic_prefixes: DEFAULT_ATTIC_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            strategies: RootStrategy::DEFAULT_ORDER.to_vec(),
            directory_policy: DirectoryPolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Defaults with every namespace-derived name rebuilt for `namespace`.
    ///
    /// `acme` yields `ACME_RESOURCE_ROOT`, `acme/.acme-find_resource-sentinel`
    /// and `libacme_marker.so`.
    pub fn for_namespace(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            root_env_var: format!("{}_RESOURCE_ROOT", namespace.to_uppercase().replace('-', "_")),
            sentinel_relpath: format!("{namespace}/.{namespace}-find_resource-sentinel"),
            marker_library: format!("lib{namespace}_marker.so"),
            ..Self::default()
        }
    }

    /// The namespace followed by a separator, e.g. `pkg/`.
    pub fn namespace_prefix(&self) -> String {
        format!("{}/", self.namespace)
    }

    /// Check the configuration for values the resolver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() || self.namespace.contains('/') {
            return Err(ConfigError::InvalidNamespace(self.namespace.clone()));
        }
        if self.root_env_var.is_empty() {
            return Err(ConfigError::EmptyField("root_env_var"));
        }
        if self.marker_library.is_empty() {
            return Err(ConfigError::EmptyField("marker_library"));
        }
        if self.install_share_relpath.is_empty() {
            return Err(ConfigError::EmptyField("install_share_relpath"));
        }
        if self.attic_dir.is_empty() {
            return Err(ConfigError::EmptyField("attic_dir"));
        }
        if self.attic_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyField("attic_prefixes entry"));
        }

        let sentinel = &self.sentinel_relpath;
        let under_namespace = sentinel
            .strip_prefix(&self.namespace_prefix())
            .is_some_and(|rest| !rest.is_empty());
        if !under_namespace || Path::new(sentinel).is_absolute() {
            return Err(ConfigError::InvalidSentinel {
                sentinel: sentinel.clone(),
                namespace: self.namespace.clone(),
            });
        }

        if self.strategies.is_empty() {
            return Err(ConfigError::EmptyField("strategies"));
        }
        let mut seen = HashSet::new();
        for strategy in &self.strategies {
            if !seen.insert(strategy) {
                return Err(ConfigError::DuplicateStrategy(strategy.to_string()));
            }
        }

        Ok(())
    }
}
