//! Run context
//!
//! Everything a reconciliation step needs that is shared across records:
//! the authenticated store handle, the resolved zone and the run settings.
//! Built once per run and never mutated afterwards.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ReconcilerConfig;
use crate::error::Result;
use crate::traits::{ZoneId, ZoneRecordStore};

/// Immutable per-run context
#[derive(Clone)]
pub struct ReconcileContext {
    store: Arc<dyn ZoneRecordStore>,
    zone_id: ZoneId,
    config: ReconcilerConfig,
}

impl std::fmt::Debug for ReconcileContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileContext")
            .field("store", &self.store.provider_name())
            .field("zone_id", &self.zone_id)
            .field("config", &self.config)
            .finish()
    }
}

impl ReconcileContext {
    /// Validate `config` and resolve its zone through `store`
    ///
    /// When `zone_id` is given the store is not asked to resolve it.
    pub async fn connect(
        store: Arc<dyn ZoneRecordStore>,
        config: ReconcilerConfig,
        zone_id: Option<&str>,
    ) -> Result<Self> {
        config.validate()?;

        let zone_id = match zone_id {
            Some(id) => {
                debug!("Using pre-configured zone ID");
                ZoneId::new(id)
            }
            None => store.resolve_zone_id(&config.domain_name).await?,
        };

        info!(
            "Using {} zone {} (ID {}) for idp '{}'{}",
            store.provider_name(),
            config.domain_name,
            zone_id,
            config.idp_key,
            if config.dry_run { " [DRY-RUN]" } else { "" }
        );

        Ok(Self::new(store, zone_id, config))
    }

    /// Assemble a context from already-resolved parts
    pub fn new(store: Arc<dyn ZoneRecordStore>, zone_id: ZoneId, config: ReconcilerConfig) -> Self {
        Self {
            store,
            zone_id,
            config,
        }
    }

    /// The zone store handle
    pub fn store(&self) -> &dyn ZoneRecordStore {
        self.store.as_ref()
    }

    /// The resolved zone
    pub fn zone_id(&self) -> &ZoneId {
        &self.zone_id
    }

    /// The run settings
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }
}
