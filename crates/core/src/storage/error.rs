//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Presign operation not supported by provider.
    #[error("presign operation not supported by storage provider")]
    PresignNotSupported,

    /// Store configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Signing failure.
    #[error("failed to sign URL for '{key}': {message}")]
    Signing {
        /// Object key being signed for.
        key: String,
        /// Underlying error message.
        message: String,
    },

    /// Write failure.
    #[error("failed to write object '{key}': {message}")]
    Write {
        /// Object key being written.
        key: String,
        /// Underlying error message.
        message: String,
    },

    /// Invalid storage key.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a signing error for a key.
    #[must_use]
    pub fn signing(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Signing {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a write error for a key.
    #[must_use]
    pub fn write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::Unsupported => Self::PresignNotSupported,
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Write {
                key: String::new(),
                message: err.to_string(),
            },
        }
    }
}
