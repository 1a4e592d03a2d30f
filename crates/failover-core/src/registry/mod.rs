//! Plugin-based zone store registry
//!
//! The registry maps store type names to factories so the binary can build
//! a [`ZoneRecordStore`] from configuration without hardcoding providers.
//!
//! ## Registration
//!
//! Provider crates expose a `register` function:
//!
//! ```rust,ignore
//! let mut registry = ZoneStoreRegistry::new();
//! failover_provider_cloudflare::register(&mut registry);
//!
//! let store = registry.create_store(&config.zone_store)?;
//! ```

use std::collections::HashMap;

use crate::config::ZoneStoreConfig;
use crate::error::{Error, Result};
use crate::traits::{ZoneRecordStore, ZoneRecordStoreFactory};

/// Registry of zone store factories, keyed by type name
#[derive(Default)]
pub struct ZoneStoreRegistry {
    stores: HashMap<String, Box<dyn ZoneRecordStoreFactory>>,
}

impl ZoneStoreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone store factory under `name` (e.g. "cloudflare")
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register_store(
        &mut self,
        name: impl Into<String>,
        factory: Box<dyn ZoneRecordStoreFactory>,
    ) {
        self.stores.insert(name.into(), factory);
    }

    /// Create a zone store from configuration
    ///
    /// The configuration is validated before the factory runs.
    pub fn create_store(&self, config: &ZoneStoreConfig) -> Result<Box<dyn ZoneRecordStore>> {
        config.validate()?;

        let store_type = config.type_name();
        let factory = self
            .stores
            .get(store_type)
            .ok_or_else(|| Error::config(format!("Unknown zone store type: {}", store_type)))?;

        factory.create(config)
    }

    /// List all registered store types
    pub fn list_stores(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stores.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a store type is registered
    pub fn has_store(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }
}
