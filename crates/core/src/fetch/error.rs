//! Fetch error types.

use thiserror::Error;

/// Errors from downloading the source form.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Source responded with a non-2xx status.
    #[error("source returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Transport-level failure (DNS, connect, read).
    #[error("failed to download form: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
