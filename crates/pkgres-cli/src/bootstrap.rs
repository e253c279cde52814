//! Resolver construction from command-line flags.

use pkgres_core::{ConfigError, DirectoryPolicy, Resolver, ResolverConfig};

use crate::parser::Cli;

/// Resolver configuration implied by the global flags.
pub fn resolver_config(cli: &Cli) -> ResolverConfig {
    let mut config = cli
        .namespace
        .as_deref()
        .map_or_else(ResolverConfig::default, ResolverConfig::for_namespace);
    if cli.reject_directories {
        config.directory_policy = DirectoryPolicy::Reject;
    }
    config
}

/// Build a resolver over the real process state.
pub fn build_resolver(cli: &Cli) -> Result<Resolver, ConfigError> {
    let config = resolver_config(cli);
    tracing::debug!(
        "Resolving in namespace '{}' via {:?}",
        config.namespace,
        config.strategies
    );
    Resolver::builder().config(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Commands;
    use clap::Parser;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli {
            namespace: None,
            reject_directories: false,
            verbose: false,
            command: Commands::Roots { json: false },
        };
        assert_eq!(resolver_config(&cli), ResolverConfig::default());
    }

    #[test]
    fn test_flags_shape_config() {
        let cli = Cli::parse_from([
            "pkgres",
            "--namespace",
            "acme",
            "--reject-directories",
            "roots",
        ]);
        let config = resolver_config(&cli);
        assert_eq!(config.namespace, "acme");
        assert_eq!(config.root_env_var, "ACME_RESOURCE_ROOT");
        assert_eq!(config.directory_policy, DirectoryPolicy::Reject);
    }

    #[test]
    fn test_invalid_namespace_is_a_config_error() {
        let cli = Cli::parse_from(["pkgres", "--namespace", "a/b", "roots"]);
        assert_eq!(
            build_resolver(&cli).unwrap_err(),
            ConfigError::InvalidNamespace("a/b".to_string())
        );
    }
}
