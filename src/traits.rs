//! Traits for swapping reference data sources

use crate::types::HsnCodeEntry;

/// Read access to HSN reference data
///
/// The report generator resolves descriptions through this trait, so it can
/// run against the built-in registry, an updated rate schedule, or a product
/// catalogue backed by the caller's own store.
pub trait HsnLookup: Send + Sync {
    /// First registered entry for `code`, if any
    fn lookup(&self, code: &str) -> Option<&HsnCodeEntry>;

    /// Description for `code`, or `"Unknown"`
    fn describe(&self, code: &str) -> &str {
        self.lookup(code)
            .map(|entry| entry.description.as_str())
            .unwrap_or("Unknown")
    }
}
