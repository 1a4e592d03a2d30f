// # Environment Option Source
//
// Maps kebab-case option keys onto prefixed, upper-case environment
// variables: with prefix `FAILOVER`, `id-broker-value` is read from
// `FAILOVER_ID_BROKER_VALUE`.
//
// The environment is snapshotted at construction so lookups are stable for
// the whole run.

use std::collections::HashMap;

use crate::traits::OptionSource;

/// Default variable prefix used by `failoverctl`
pub const DEFAULT_ENV_PREFIX: &str = "FAILOVER";

/// Option source backed by a snapshot of environment variables
#[derive(Debug, Clone)]
pub struct EnvOptionSource {
    prefix: String,
    vars: HashMap<String, String>,
}

impl EnvOptionSource {
    /// Snapshot the process environment
    pub fn from_env(prefix: impl Into<String>) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Build from an explicit list of variables
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The variable name consulted for `key`
    pub fn var_name(&self, key: &str) -> String {
        let key = key.to_uppercase().replace(['-', '.'], "_");
        if self.prefix.is_empty() {
            key
        } else {
            format!("{}_{}", self.prefix, key)
        }
    }
}

impl OptionSource for EnvOptionSource {
    fn lookup(&self, key: &str) -> Option<String> {
        // Empty variables count as unset
        self.vars
            .get(&self.var_name(key))
            .filter(|value| !value.is_empty())
            .cloned()
    }
}
