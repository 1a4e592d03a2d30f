//! Layered option source
//!
//! Consults each layer in order; the first layer that holds a key wins.

use crate::traits::OptionSource;

/// Ordered stack of option sources
#[derive(Default)]
pub struct LayeredOptionSource {
    layers: Vec<Box<dyn OptionSource>>,
}

impl LayeredOptionSource {
    /// Create an empty stack (every lookup falls back to its default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower precedence than the existing ones
    pub fn with_layer(mut self, layer: impl OptionSource + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if there are no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl OptionSource for LayeredOptionSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.lookup(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{EnvOptionSource, MapOptionSource};

    #[test]
    fn test_first_layer_wins() {
        let options = LayeredOptionSource::new()
            .with_layer(MapOptionSource::new().with("ssp-value", "from-flag"))
            .with_layer(EnvOptionSource::from_vars(
                "FAILOVER",
                [
                    ("FAILOVER_SSP_VALUE", "from-env"),
                    ("FAILOVER_PW_API_VALUE", "pw.example.net"),
                ],
            ));

        assert_eq!(options.len(), 2);
        assert_eq!(options.get("ssp-value", ""), "from-flag");
        assert_eq!(options.get("pw-api-value", ""), "pw.example.net");
        assert_eq!(options.get("id-sync-value", "fallback"), "fallback");
    }

    #[test]
    fn test_empty_stack_uses_defaults() {
        let options = LayeredOptionSource::new();
        assert!(options.is_empty());
        assert_eq!(options.get("mfa-api-name", "mfa-api"), "mfa-api");
    }

    #[test]
    fn test_empty_override_falls_through() {
        let options = LayeredOptionSource::new()
            .with_layer(MapOptionSource::new().with("ssp-name", ""))
            .with_layer(MapOptionSource::new().with("ssp-name", "portal"));

        assert_eq!(options.get("ssp-name", "ssp"), "portal");
    }
}
