//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Each variant carries the client-facing message verbatim; the variant
/// selects the HTTP status and the error code used in logs. Everything
/// except `Validation` surfaces as a 500: the caller cannot tell retryable
/// from non-retryable causes and is expected to resubmit if desired.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request fields.
    #[error("{0}")]
    Validation(String),

    /// Source document unreachable or rejected the request.
    #[error("{0}")]
    Fetch(String),

    /// Conversion engine unreachable, timed out, or returned malformed JSON.
    #[error("{0}")]
    ConversionTransport(String),

    /// Conversion engine understood the request but reports the form invalid.
    #[error("{0}")]
    ConversionFailed(String),

    /// Signing or write failure against the object store.
    #[error("{0}")]
    Storage(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Fetch(_)
            | Self::ConversionTransport(_)
            | Self::ConversionFailed(_)
            | Self::Storage(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code used in structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Fetch(_) => "FETCH_ERROR",
            Self::ConversionTransport(_) => "CONVERSION_TRANSPORT_ERROR",
            Self::ConversionFailed(_) => "CONVERSION_FAILED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::Fetch(String::new()).status_code(), 500);
        assert_eq!(
            AppError::ConversionTransport(String::new()).status_code(),
            500
        );
        assert_eq!(AppError::ConversionFailed(String::new()).status_code(), 500);
        assert_eq!(AppError::Storage(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::Fetch(String::new()).error_code(), "FETCH_ERROR");
        assert_eq!(
            AppError::ConversionTransport(String::new()).error_code(),
            "CONVERSION_TRANSPORT_ERROR"
        );
        assert_eq!(
            AppError::ConversionFailed(String::new()).error_code(),
            "CONVERSION_FAILED"
        );
        assert_eq!(
            AppError::Storage(String::new()).error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display_is_verbatim() {
        assert_eq!(
            AppError::Validation("formUrl is required".into()).to_string(),
            "formUrl is required"
        );
        assert_eq!(
            AppError::ConversionFailed("Conversion failed: row 3: missing type".into()).to_string(),
            "Conversion failed: row 3: missing type"
        );
    }
}
