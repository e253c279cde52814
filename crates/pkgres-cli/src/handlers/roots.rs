//! Roots command handler.
//!
//! Diagnostic view of root discovery: every configured strategy, what it
//! found, and which one a lookup would use.

use anyhow::Result;

use pkgres_core::Resolver;

/// Print the probe of every strategy in `key = value` lines or as JSON.
pub fn execute(resolver: &Resolver, json: bool) -> Result<()> {
    let probes = resolver.probe_roots();
    if json {
        println!("{}", serde_json::to_string_pretty(&probes)?);
    } else {
        let config = resolver.config();
        println!("namespace = {}", config.namespace);
        println!("override = {}", config.root_env_var);
        println!("sentinel = {}", config.sentinel_relpath);
        println!("{probes}");
    }

    if probes.selected().is_none() {
        tracing::warn!("No resource root is available; every lookup will fail");
    }
    Ok(())
}
