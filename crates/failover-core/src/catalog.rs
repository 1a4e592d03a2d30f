//! Service catalog
//!
//! The fixed list of services whose public CNAMEs move between regions
//! during a failover. Each entry names the option keys an operator uses to
//! override the record name and to supply the target value.

/// How a service's default record name is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// A literal record name, independent of the identity provider
    Fixed(&'static str),
    /// `"<idpKey>-<suffix>"`
    TemplatedOnIdp {
        /// Suffix appended after the idp key and a hyphen
        suffix: &'static str,
    },
}

impl NameRule {
    /// Evaluate the default record name for `idp_key`
    pub fn default_name(&self, idp_key: &str) -> String {
        match self {
            NameRule::Fixed(name) => (*name).to_string(),
            NameRule::TemplatedOnIdp { suffix } => format!("{}-{}", idp_key, suffix),
        }
    }
}

/// Static catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Option key overriding the record name
    pub option_key_for_name: &'static str,
    /// Rule producing the record name when no override is set
    pub name_rule: NameRule,
    /// Option key holding the desired CNAME target
    pub option_key_for_value: &'static str,
}

impl ServiceSpec {
    const fn fixed(name_key: &'static str, name: &'static str, value_key: &'static str) -> Self {
        Self {
            option_key_for_name: name_key,
            name_rule: NameRule::Fixed(name),
            option_key_for_value: value_key,
        }
    }

    const fn per_idp(
        name_key: &'static str,
        suffix: &'static str,
        value_key: &'static str,
    ) -> Self {
        Self {
            option_key_for_name: name_key,
            name_rule: NameRule::TemplatedOnIdp { suffix },
            option_key_for_value: value_key,
        }
    }
}

/// Services reconciled on every run, in operator-facing order
pub const SERVICE_CATALOG: [ServiceSpec; 8] = [
    // TOTP API (serverless-mfa-api)
    ServiceSpec::fixed("mfa-api-name", "mfa-api", "mfa-api-value"),
    // WebAuthn API (serverless-mfa-api-go)
    ServiceSpec::fixed("twosv-api-name", "twosv-api", "twosv-api-value"),
    // Support bot endpoint registered with Slack
    ServiceSpec::fixed("support-bot-name", "sherlock", "support-bot-value"),
    // Per-IdP ECS services
    ServiceSpec::per_idp("email-service-name", "email-service", "email-service-value"),
    ServiceSpec::per_idp("id-broker-name", "id-broker", "id-broker-value"),
    ServiceSpec::per_idp("pw-api-name", "pw-api", "pw-api-value"),
    ServiceSpec::per_idp("ssp-name", "ssp", "ssp-value"),
    ServiceSpec::per_idp("id-sync-name", "id-sync", "id-sync-value"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_name_rules() {
        assert_eq!(NameRule::Fixed("sherlock").default_name("acme"), "sherlock");
        assert_eq!(
            NameRule::TemplatedOnIdp { suffix: "id-broker" }.default_name("acme"),
            "acme-id-broker"
        );
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<String> = SERVICE_CATALOG
            .iter()
            .map(|spec| spec.name_rule.default_name("acme"))
            .collect();
        assert_eq!(names.len(), SERVICE_CATALOG.len());
    }

    #[test]
    fn test_catalog_option_keys() {
        for spec in &SERVICE_CATALOG {
            assert!(spec.option_key_for_name.ends_with("-name"));
            assert!(spec.option_key_for_value.ends_with("-value"));
            assert_eq!(
                spec.option_key_for_name.trim_end_matches("-name"),
                spec.option_key_for_value.trim_end_matches("-value"),
            );
        }
    }
}
