//! Conversion error types.

use thiserror::Error;

/// Errors from the conversion engine call.
///
/// `Rejected` is the only semantic variant: the engine understood the request
/// and reports the form itself is invalid. Everything else is transport.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Engine did not answer within the configured timeout.
    #[error("conversion engine timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// Engine responded with a non-2xx status.
    #[error("conversion engine returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// Engine response was not parseable JSON.
    #[error("failed to parse conversion engine response: {0}")]
    Parse(String),

    /// Transport-level failure (DNS, connect, read).
    #[error("conversion engine transport error: {0}")]
    Transport(String),

    /// Engine reports the form is invalid.
    #[error("{0}")]
    Rejected(String),
}
