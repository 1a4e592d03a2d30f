//! Option source trait
//!
//! An option source answers string lookups by kebab-case key
//! (e.g. `"id-broker-value"`). It never fails: an unset key yields the
//! caller's default. An empty value counts as unset in every source.

/// Read-only key/value lookup with fallback defaults
pub trait OptionSource: Send + Sync {
    /// Look up a key, returning `None` when it is unset
    fn lookup(&self, key: &str) -> Option<String>;

    /// Look up a key, falling back to `default` when it is unset
    fn get(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }
}
