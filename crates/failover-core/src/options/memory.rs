// # Map Option Source
//
// In-memory implementation of OptionSource.
//
// Used for `--set key=value` overrides and in tests.

use std::collections::HashMap;

use crate::traits::OptionSource;

/// In-memory option source backed by a HashMap
///
/// # Example
///
/// ```rust
/// use failover_core::options::MapOptionSource;
/// use failover_core::traits::OptionSource;
///
/// let options = MapOptionSource::new().with("id-broker-value", "broker.example.net");
/// assert_eq!(options.get("id-broker-value", ""), "broker.example.net");
/// assert_eq!(options.get("ssp-value", ""), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapOptionSource {
    values: HashMap<String, String>,
}

impl MapOptionSource {
    /// Create an empty option source
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parse a `key=value` assignment
    ///
    /// The value may itself contain `=`; the key may not be empty.
    pub fn insert_assignment(&mut self, assignment: &str) -> crate::Result<()> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                self.insert(key.trim(), value);
                Ok(())
            }
            _ => Err(crate::Error::config(format!(
                "Invalid option assignment '{}', expected key=value",
                assignment
            ))),
        }
    }

    /// Number of keys set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no keys are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for MapOptionSource {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl OptionSource for MapOptionSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|value| !value.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let options = MapOptionSource::new();
        assert_eq!(options.get("mfa-api-name", "mfa-api"), "mfa-api");
        assert_eq!(options.get("mfa-api-value", ""), "");
    }

    #[test]
    fn test_assignment_parsing() {
        let mut options = MapOptionSource::new();
        options.insert_assignment("ssp-value=ssp.example.net").unwrap();
        options.insert_assignment("support-bot-value=a=b").unwrap();

        assert_eq!(options.get("ssp-value", ""), "ssp.example.net");
        assert_eq!(options.get("support-bot-value", ""), "a=b");
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_assignment_without_key_is_rejected() {
        let mut options = MapOptionSource::new();
        assert!(options.insert_assignment("=value").is_err());
        assert!(options.insert_assignment("no-equals-sign").is_err());
        assert!(options.is_empty());
    }

    #[test]
    fn test_empty_value_is_unset() {
        let mut options = MapOptionSource::new();
        options.insert_assignment("ssp-name=").unwrap();

        assert_eq!(options.lookup("ssp-name"), None);
        assert_eq!(options.get("ssp-name", "ssp"), "ssp");
    }
}
