//! Service catalog resolver
//!
//! Expands the catalog into concrete `(record name, desired value)` pairs
//! for one run, applying operator overrides from an [`OptionSource`].

use crate::catalog::ServiceSpec;
use crate::traits::OptionSource;

/// One catalog entry resolved for the current run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    /// Short record name, relative to the zone
    pub name: String,
    /// Desired CNAME target; empty means no change was requested
    pub desired_value: String,
}

impl ResolvedRecord {
    /// Create a resolved record
    pub fn new(name: impl Into<String>, desired_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desired_value: desired_value.into(),
        }
    }

    /// Whether the operator supplied a target for this record
    pub fn has_value(&self) -> bool {
        !self.desired_value.is_empty()
    }
}

/// Resolve a single catalog entry
pub fn resolve_one(spec: &ServiceSpec, idp_key: &str, options: &dyn OptionSource) -> ResolvedRecord {
    let default_name = spec.name_rule.default_name(idp_key);
    ResolvedRecord {
        name: options.get(spec.option_key_for_name, &default_name),
        desired_value: options.get(spec.option_key_for_value, ""),
    }
}

/// Lazily resolve `catalog` in order
///
/// Nothing is looked up until the iterator is advanced. A missing option
/// always falls back to its default, so resolution cannot fail.
pub fn resolve<'a>(
    catalog: &'a [ServiceSpec],
    idp_key: &'a str,
    options: &'a dyn OptionSource,
) -> impl Iterator<Item = ResolvedRecord> + 'a {
    catalog
        .iter()
        .map(move |spec| resolve_one(spec, idp_key, options))
}
