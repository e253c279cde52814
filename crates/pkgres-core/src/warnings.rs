//! Deduplicated warning emission.
//!
//! Deprecation notices should reach the log once, not on every resolution.
//! A `WarningRegistry` remembers which messages it has already emitted.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

/// Process-wide registry, created on first use.
static GLOBAL_REGISTRY: LazyLock<Arc<WarningRegistry>> =
    LazyLock::new(|| Arc::new(WarningRegistry::new()));

/// Emits each distinct warning message at most once.
#[derive(Debug, Default)]
pub struct WarningRegistry {
    emitted: Mutex<HashSet<String>>,
}

impl WarningRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    pub fn global() -> Arc<Self> {
        GLOBAL_REGISTRY.clone()
    }

    /// Log `message` at warn level unless it was logged before.
    ///
    /// Returns `true` if this call emitted the warning.
    pub fn warn_once(&self, message: &str) -> bool {
        let first = self
            .emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(message.to_string());
        if first {
            tracing::warn!("{}", message);
        }
        first
    }

    /// Whether `message` has been emitted by this registry.
    pub fn has_emitted(&self, message: &str) -> bool {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(message)
    }

    /// Number of distinct messages emitted so far.
    pub fn emitted_count(&self) -> usize {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
