//! Configuration types for the failover system
//!
//! Configuration is read once from an [`OptionSource`] at startup and is
//! immutable for the rest of the run. Every check here happens before any
//! record is processed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::OptionSource;

/// Option key holding the zone's domain name
pub const DOMAIN_NAME_KEY: &str = "domain-name";

/// Option key holding the Cloudflare API token
pub const CLOUDFLARE_TOKEN_KEY: &str = "cloudflare-token";

/// Option key holding an explicit Cloudflare zone ID (skips zone lookup)
pub const CLOUDFLARE_ZONE_ID_KEY: &str = "cloudflare-zone-id";

/// Run-scoped reconciler settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Zone the managed records live in (e.g. "example.com")
    pub domain_name: String,

    /// Report what would change without writing
    #[serde(default)]
    pub dry_run: bool,

    /// Active identity provider key, used to template service record names
    pub idp_key: String,
}

impl ReconcilerConfig {
    /// Create a new reconciler configuration
    pub fn new(domain_name: impl Into<String>, idp_key: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            dry_run: false,
            idp_key: idp_key.into(),
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Fully-qualified name of a record in this zone
    pub fn fqdn(&self, record_name: &str) -> String {
        format!("{}.{}", record_name, self.domain_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.domain_name.is_empty() {
            return Err(Error::config(format!(
                "Domain name is not configured. Use '{}' parameter.",
                DOMAIN_NAME_KEY
            )));
        }

        validate_domain_name(&self.domain_name)?;

        if self.idp_key.trim().is_empty() {
            return Err(Error::config("IdP key is not configured. Use '--idp' parameter."));
        }

        // The key prefixes record names, so it must itself be a valid label
        validate_label(&self.idp_key)?;

        Ok(())
    }
}

/// Zone record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZoneStoreConfig {
    /// Cloudflare API v4
    Cloudflare {
        /// Cloudflare API token
        api_token: String,
        /// Zone ID (optional, resolved from the domain name when absent)
        zone_id: Option<String>,
    },

    /// Custom store
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ZoneStoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<()> {
        match self {
            ZoneStoreConfig::Cloudflare { api_token, .. } => {
                if api_token.is_empty() {
                    return Err(Error::config(format!(
                        "Cloudflare Token is not configured. Use '{}' parameter.",
                        CLOUDFLARE_TOKEN_KEY
                    )));
                }
                Ok(())
            }
            ZoneStoreConfig::Custom { factory, .. } => {
                if factory.is_empty() {
                    return Err(Error::config("Custom zone store factory cannot be empty"));
                }
                Ok(())
            }
        }
    }

    /// Get the store type name
    pub fn type_name(&self) -> &str {
        match self {
            ZoneStoreConfig::Cloudflare { .. } => "cloudflare",
            ZoneStoreConfig::Custom { factory, .. } => factory,
        }
    }

    /// Explicitly configured zone ID, if any
    pub fn zone_id(&self) -> Option<&str> {
        match self {
            ZoneStoreConfig::Cloudflare { zone_id, .. } => zone_id.as_deref(),
            ZoneStoreConfig::Custom { .. } => None,
        }
    }
}

/// Complete configuration for one failover invocation
#[derive(Debug, Clone)]
pub struct FailoverConfig {
    /// Reconciler settings
    pub reconciler: ReconcilerConfig,

    /// Zone store settings
    pub zone_store: ZoneStoreConfig,
}

impl FailoverConfig {
    /// Build the configuration from an option source
    ///
    /// `idp_key` and `dry_run` come from the command line rather than the
    /// option source.
    pub fn from_options(
        options: &dyn OptionSource,
        idp_key: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        let reconciler =
            ReconcilerConfig::new(options.get(DOMAIN_NAME_KEY, ""), idp_key).with_dry_run(dry_run);

        let zone_store = ZoneStoreConfig::Cloudflare {
            api_token: options.get(CLOUDFLARE_TOKEN_KEY, ""),
            zone_id: options.lookup(CLOUDFLARE_ZONE_ID_KEY).filter(|id| !id.is_empty()),
        };

        Self {
            reconciler,
            zone_store,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.reconciler.validate()?;
        self.zone_store.validate()?;
        Ok(())
    }
}

/// Validate that a string is a valid domain name
///
/// Basic RFC 1035 checks: total length, label length, characters, and no
/// leading or trailing hyphen.
pub fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::config("Domain name cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(Error::config(format!("Domain name has empty label: '{}'", domain)));
        }

        validate_label(label)?;
    }

    Ok(())
}

/// Check a single DNS label
fn validate_label(label: &str) -> Result<()> {
    if label.len() > 63 {
        return Err(Error::config(format!(
            "Domain label too long: {} chars (max 63). Label: '{}'",
            label.len(),
            label
        )));
    }

    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(Error::config(format!(
            "Domain label contains invalid characters. Label: '{}'",
            label
        )));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(Error::config(format!(
            "Domain label cannot start or end with hyphen. Label: '{}'",
            label
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MapOptionSource;

    #[test]
    fn test_from_options() {
        let options = MapOptionSource::new()
            .with("domain-name", "example.com")
            .with("cloudflare-token", "secret")
            .with("cloudflare-zone-id", "");

        let config = FailoverConfig::from_options(&options, "acme", true);
        assert_eq!(config.reconciler.domain_name, "example.com");
        assert_eq!(config.reconciler.idp_key, "acme");
        assert!(config.reconciler.dry_run);
        assert_eq!(config.zone_store.type_name(), "cloudflare");
        assert_eq!(config.zone_store.zone_id(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_domain_name() {
        let options = MapOptionSource::new().with("cloudflare-token", "secret");
        let config = FailoverConfig::from_options(&options, "acme", false);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("domain-name"));
    }

    #[test]
    fn test_missing_token() {
        let options = MapOptionSource::new().with("domain-name", "example.com");
        let config = FailoverConfig::from_options(&options, "acme", false);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cloudflare-token"));
    }

    #[test]
    fn test_empty_idp_key() {
        let config = ReconcilerConfig::new("example.com", "  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_idp_key_must_be_a_label() {
        assert!(ReconcilerConfig::new("example.com", "acme").validate().is_ok());
        assert!(ReconcilerConfig::new("example.com", "acme-2").validate().is_ok());

        for key in [" acme", "acme ", "ac me", "acme.", "-acme"] {
            let err = ReconcilerConfig::new("example.com", key).validate().unwrap_err();
            assert!(matches!(err, Error::Config(_)), "key {:?}", key);
        }
    }

    #[test]
    fn test_fqdn() {
        let config = ReconcilerConfig::new("example.com", "acme");
        assert_eq!(config.fqdn("acme-id-broker"), "acme-id-broker.example.com");
    }

    #[test]
    fn test_domain_name_validation() {
        assert!(validate_domain_name("example.com").is_ok());
        assert!(validate_domain_name("sub-1.example.co.uk").is_ok());
        assert!(validate_domain_name("example..com").is_err());
        assert!(validate_domain_name("-example.com").is_err());
        assert!(validate_domain_name("exa mple.com").is_err());
        assert!(validate_domain_name(&format!("{}.com", "a".repeat(64))).is_err());
    }

    #[test]
    fn test_store_config_serde_tag() {
        let config: ZoneStoreConfig = serde_json::from_value(serde_json::json!({
            "type": "cloudflare",
            "api_token": "secret",
            "zone_id": "zone-1",
        }))
        .unwrap();
        assert_eq!(config.zone_id(), Some("zone-1"));
    }
}
