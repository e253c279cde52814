//! Shape checks for resource identifiers.

use std::path::Path;

use crate::error::ResolveError;

/// Require a relative identifier that starts with `namespace_prefix`.
///
/// The caller handles the empty identifier before getting here.
pub(super) fn validate(identifier: &str, namespace_prefix: &str) -> Result<(), ResolveError> {
    if identifier.starts_with('/') || Path::new(identifier).is_absolute() {
        return Err(invalid(identifier, "is not a relative path".to_string()));
    }
    if !identifier.starts_with(namespace_prefix) {
        return Err(invalid(
            identifier,
            format!("does not start with {namespace_prefix}"),
        ));
    }
    Ok(())
}

fn invalid(identifier: &str, reason: String) -> ResolveError {
    ResolveError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason,
    }
}
