//! Error types for the failover system
//!
//! Every error returned by the reconciler is fatal for the run. Soft,
//! per-record outcomes (skipped, already set, declined, dry run) are not
//! errors and never reach this type.

use thiserror::Error;

/// Result type alias for failover operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the failover system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing domain name, credentials, idp key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The zone store could not be queried for a record
    #[error("error finding DNS record {name}: {message}")]
    Lookup {
        /// Short record name
        name: String,
        /// Underlying cause
        message: String,
    },

    /// The zone lookup did not return exactly one record
    #[error("did not find DNS record {name} (expected exactly one match, found {matches})")]
    LookupMismatch {
        /// Short record name
        name: String,
        /// Number of records the store returned
        matches: usize,
    },

    /// The zone store rejected or failed a record update
    #[error("error updating DNS record {name}: {message}")]
    Update {
        /// Short record name
        name: String,
        /// Underlying cause
        message: String,
    },

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Zone or record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP client errors (from provider APIs)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The operator prompt could not be read
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// I/O errors (config files, terminal)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a fatal error
///
/// The orchestrator uses this to decide how to report an aborted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Detected before any record was processed
    Configuration,
    /// A zone or record could not be read unambiguously from the store
    Lookup,
    /// A record update failed
    Write,
    /// Talking to the operator failed (narration output or prompt input)
    Operator,
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a lookup error for a record
    pub fn lookup(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an update error for a record
    pub fn update(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Update {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a prompt error
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify the error for the run orchestrator
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::Json(_) => ErrorKind::Configuration,
            Error::Update { .. } => ErrorKind::Write,
            Error::Io(_) | Error::Prompt(_) => ErrorKind::Operator,
            // Store calls outside a record update (zone resolution, listing)
            Error::Lookup { .. }
            | Error::LookupMismatch { .. }
            | Error::Provider { .. }
            | Error::Authentication(_)
            | Error::RateLimited(_)
            | Error::NotFound(_)
            | Error::Http(_)
            | Error::Other(_) => ErrorKind::Lookup,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
