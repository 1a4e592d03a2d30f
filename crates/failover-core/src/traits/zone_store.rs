// # Zone Record Store Trait
//
// Defines the interface to a DNS provider's zone records.
//
// ## Implementations
//
// - Cloudflare: `failover-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use failover_core::traits::{RecordFilter, ZoneRecordStore};
//
// let zone = store.resolve_zone_id("example.com").await?;
// let records = store
//     .list_records(&zone, &RecordFilter::by_name("mfa-api.example.com"))
//     .await?;
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only record type this system reads or writes
pub const CNAME: &str = "CNAME";

/// Provider-assigned identifier of a DNS zone
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(String);

impl ZoneId {
    /// Wrap a provider zone identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A DNS record as the provider sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Opaque provider identifier
    pub id: String,
    /// Fully-qualified record name
    pub name: String,
    /// Current record value
    pub content: String,
    /// Record type (always "CNAME" for records this system manages)
    #[serde(rename = "type")]
    pub record_type: String,
}

/// Filter for listing zone records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    /// Fully-qualified record name to match exactly
    pub name: String,
}

impl RecordFilter {
    /// Match records by fully-qualified name
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An update request for an existing record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordUpdate {
    /// Identifier of the record being replaced
    #[serde(skip)]
    pub id: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record name, preserved from the looked-up record
    pub name: String,
    /// New record value
    pub content: String,
}

impl RecordUpdate {
    /// Build a CNAME update that keeps `record`'s id and name
    pub fn cname(record: &ZoneRecord, content: impl Into<String>) -> Self {
        Self {
            id: record.id.clone(),
            record_type: CNAME.to_string(),
            name: record.name.clone(),
            content: content.into(),
        }
    }
}

/// Trait for zone record store implementations
///
/// Stores are stateless, single-shot wrappers around a provider API. They
/// never retry, never decide whether a change is needed and never prompt;
/// that is owned by the [`Reconciler`](crate::Reconciler).
///
/// The store handle is shared read-only across a run and must not be
/// mutated after construction.
#[async_trait]
pub trait ZoneRecordStore: Send + Sync {
    /// Resolve a zone name (e.g. "example.com") to its identifier
    async fn resolve_zone_id(&self, domain_name: &str) -> Result<ZoneId, crate::Error>;

    /// List the records in `zone` matching `filter`
    ///
    /// Returns every match; deciding what zero or several matches mean is
    /// the caller's job.
    async fn list_records(
        &self,
        zone: &ZoneId,
        filter: &RecordFilter,
    ) -> Result<Vec<ZoneRecord>, crate::Error>;

    /// Replace the content of an existing record
    async fn update_record(
        &self,
        zone: &ZoneId,
        update: &RecordUpdate,
    ) -> Result<ZoneRecord, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing zone record stores from configuration
pub trait ZoneRecordStoreFactory: Send + Sync {
    /// Create a ZoneRecordStore instance from configuration
    fn create(
        &self,
        config: &crate::config::ZoneStoreConfig,
    ) -> Result<Box<dyn ZoneRecordStore>, crate::Error>;
}
