//! Find command handler.

use anyhow::Result;

use pkgres_core::{ResolutionResult, Resolver};

/// Resolve `identifier` and print the path (or the whole result as JSON).
///
/// A failed lookup is returned as an error even when the JSON was printed.
pub fn execute(resolver: &Resolver, identifier: &str, json: bool) -> Result<()> {
    let result = resolver.resolve(identifier);
    println!("{}", render(&result, json)?);
    result.absolute_path_or_fail()?;
    Ok(())
}

/// Text printed for `result`: the path, or the serialized result with `json`.
pub fn render(result: &ResolutionResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    Ok(result.absolute_path_or_fail()?.display().to_string())
}
