// # Cloudflare Zone Record Store
//
// Cloudflare API v4 implementation of `ZoneRecordStore`.
//
// - One HTTP request per trait call
// - No retry, no backoff, no caching (a failed call aborts the run upstream)
// - HTTP timeout configured (30 seconds)
// - Specific error handling for HTTP status codes (401, 403, 404, 409, 429, 5xx)
// - API token never appears in logs or Debug output
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...`
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use failover_core::config::ZoneStoreConfig;
use failover_core::traits::{
    RecordFilter, RecordUpdate, ZoneId, ZoneRecord, ZoneRecordStore, ZoneRecordStoreFactory,
};
use failover_core::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER: &str = "cloudflare";

/// Cloudflare response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
    name: String,
}

/// Cloudflare zone record store
///
/// Holds one authenticated HTTP client for the whole run. The client is
/// never mutated after construction.
pub struct CloudflareZoneStore {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL (overridable for tests)
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareZoneStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareZoneStore")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl CloudflareZoneStore {
    /// Create a new Cloudflare zone store
    ///
    /// `api_token` needs Zone:DNS:Edit permission on the failover zone.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_api_base(api_token, CLOUDFLARE_API_BASE)
    }

    /// Create a store talking to a different API base URL
    pub fn with_api_base(api_token: impl Into<String>, api_base: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Send a request and unwrap the Cloudflare envelope
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(status_error(status.as_u16(), &error_text, context));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to parse response: {}", e)))?;

        if !envelope.success {
            return Err(Error::provider(
                PROVIDER,
                format!("{} failed: {}", context, describe_errors(&envelope.errors)),
            ));
        }

        envelope.result.ok_or_else(|| {
            Error::provider(PROVIDER, format!("{}: response has no result", context))
        })
    }
}

/// Map an HTTP failure status to an error
fn status_error(status: u16, body: &str, context: &str) -> Error {
    match status {
        401 | 403 => Error::auth(format!(
            "Invalid API token or insufficient permissions. Status: {}",
            status
        )),
        404 => Error::not_found(format!("{}: {}", context, body)),
        409 => Error::provider(
            PROVIDER,
            format!("Conflict: record is being updated by another process. Status: {}", status),
        ),
        429 => Error::rate_limited(format!("Cloudflare rate limit exceeded. Status: {}", status)),
        500..=599 => Error::provider(
            PROVIDER,
            format!("Cloudflare server error (transient): {} - {}", status, body),
        ),
        _ => Error::provider(PROVIDER, format!("{} failed: {} - {}", context, status, body)),
    }
}

fn describe_errors(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} (code {})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl ZoneRecordStore for CloudflareZoneStore {
    /// ```http
    /// GET /zones?name=example.com
    /// ```
    async fn resolve_zone_id(&self, domain_name: &str) -> Result<ZoneId> {
        tracing::debug!("Looking up zone ID for domain: {}", domain_name);

        let request = self
            .client
            .get(self.url("/zones"))
            .query(&[("name", domain_name)]);
        let zones: Vec<Zone> = self.send(request, "Zone lookup").await?;

        match zones.as_slice() {
            [zone] => {
                tracing::debug!("Found zone {} with ID {}", zone.name, zone.id);
                Ok(ZoneId::new(zone.id.clone()))
            }
            [] => Err(Error::not_found(format!("Zone not found: {}", domain_name))),
            _ => Err(Error::provider(
                PROVIDER,
                format!("Ambiguous zone name {}: {} zones match", domain_name, zones.len()),
            )),
        }
    }

    /// ```http
    /// GET /zones/:zone_id/dns_records?name=mfa-api.example.com
    /// ```
    async fn list_records(&self, zone: &ZoneId, filter: &RecordFilter) -> Result<Vec<ZoneRecord>> {
        tracing::debug!("Listing records named {}", filter.name);

        let request = self
            .client
            .get(self.url(&format!("/zones/{}/dns_records", zone)))
            .query(&[("name", filter.name.as_str())]);
        let records: Vec<ZoneRecord> = self.send(request, "Record lookup").await?;

        tracing::debug!("{} record(s) named {}", records.len(), filter.name);
        Ok(records)
    }

    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// { "type": "CNAME", "name": "...", "content": "..." }
    /// ```
    async fn update_record(&self, zone: &ZoneId, update: &RecordUpdate) -> Result<ZoneRecord> {
        tracing::info!(
            "Updating Cloudflare DNS record: {} -> {} ({})",
            update.name,
            update.content,
            update.record_type
        );

        let request = self
            .client
            .patch(self.url(&format!("/zones/{}/dns_records/{}", zone, update.id)))
            .json(update);
        let record: ZoneRecord = self.send(request, "Record update").await?;

        tracing::info!("DNS record updated successfully: {} -> {}", record.name, record.content);
        Ok(record)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Factory for creating Cloudflare zone stores
pub struct CloudflareFactory;

impl ZoneRecordStoreFactory for CloudflareFactory {
    fn create(&self, config: &ZoneStoreConfig) -> Result<Box<dyn ZoneRecordStore>> {
        match config {
            ZoneStoreConfig::Cloudflare { api_token, .. } => {
                if api_token.is_empty() {
                    return Err(Error::config("Cloudflare API token is required"));
                }
                Ok(Box::new(CloudflareZoneStore::new(api_token.clone())?))
            }
            _ => Err(Error::config("Invalid config for Cloudflare zone store")),
        }
    }
}

/// Register the Cloudflare store with a registry
///
/// # Example
///
/// ```rust
/// use failover_core::ZoneStoreRegistry;
///
/// let mut registry = ZoneStoreRegistry::new();
/// failover_provider_cloudflare::register(&mut registry);
/// assert!(registry.has_store("cloudflare"));
/// ```
pub fn register(registry: &mut failover_core::ZoneStoreRegistry) {
    registry.register_store(PROVIDER, Box::new(CloudflareFactory));
}
