//! Core traits for the failover system
//!
//! This module defines the collaborator interfaces the reconciler consumes.
//!
//! - [`ZoneRecordStore`]: Read and update DNS records via a provider API
//! - [`OptionSource`]: Look up operator-supplied names and values
//! - [`OperatorPrompt`]: Ask the operator to confirm a change

pub mod operator_prompt;
pub mod option_source;
pub mod zone_store;

pub use operator_prompt::OperatorPrompt;
pub use option_source::OptionSource;
pub use zone_store::{
    CNAME, RecordFilter, RecordUpdate, ZoneId, ZoneRecord, ZoneRecordStore,
    ZoneRecordStoreFactory,
};
