//! Operator prompt trait
//!
//! The confirmation gate asks a human before every live write. The prompt
//! blocks the run until one line of input is available.

/// Blocking, line-oriented operator input
pub trait OperatorPrompt: Send + Sync {
    /// Show `message` and return one line of operator input
    ///
    /// Implementations strip the line terminator and nothing else, so
    /// `"yes "` and `"yes"` stay distinct. End of input returns an empty
    /// string.
    fn prompt(&self, message: &str) -> Result<String, crate::Error>;
}
