// # failover-core
//
// Core library for region failover of public DNS CNAME records.
//
// ## Architecture Overview
//
// - **Service catalog**: the fixed list of services that move between regions
// - **Resolver**: expands the catalog into `(record name, desired value)` pairs
//   using operator-supplied options
// - **Reconciler**: looks up each record, compares it, and after operator
//   confirmation updates it through a zone record store
// - **ZoneRecordStore**: trait for provider APIs (see
//   `failover-provider-cloudflare`)
// - **ZoneStoreRegistry**: plugin-based registry of store factories
//
// ## Design Principles
//
// 1. **Human in the loop**: nothing is written without an explicit "yes"
// 2. **Sequential**: one record at a time, no retries, no rollback
// 3. **Fail loudly**: an ambiguous lookup or failed write aborts the run
// 4. **Library-first**: the binary only wires collaborators together

pub mod catalog;
pub mod config;
pub mod error;
pub mod options;
pub mod prompt;
pub mod reconciler;
pub mod registry;
pub mod resolver;
pub mod traits;

// Re-export core types for convenience
pub use catalog::{NameRule, SERVICE_CATALOG, ServiceSpec};
pub use config::{FailoverConfig, ReconcilerConfig, ZoneStoreConfig};
pub use error::{Error, ErrorKind, Result};
pub use prompt::LinePrompt;
pub use reconciler::{ReconcileContext, Reconciler, RecordOutcome, RunSummary};
pub use registry::ZoneStoreRegistry;
pub use resolver::ResolvedRecord;
pub use traits::{OperatorPrompt, OptionSource, ZoneRecordStore};
