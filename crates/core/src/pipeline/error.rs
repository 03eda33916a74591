//! Pipeline error types.

use thiserror::Error;

use crate::convert::ConvertError;
use crate::fetch::FetchError;
use crate::storage::StorageError;

/// Stage-tagged pipeline failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Failure while downloading the source form.
    #[error("failed to fetch form: {0}")]
    Fetch(#[from] FetchError),

    /// Failure while converting the form.
    #[error("conversion failed: {0}")]
    Convert(#[from] ConvertError),

    /// Failure while persisting the converted output.
    #[error("failed to store converted form: {0}")]
    Store(#[from] StorageError),
}

impl PipelineError {
    /// The stage the pipeline failed in.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetching",
            Self::Convert(_) => "converting",
            Self::Store(_) => "persisting",
        }
    }

    /// Whether the failure is the engine rejecting the form itself, as
    /// opposed to any of the three network legs breaking.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Convert(ConvertError::Rejected(_)))
    }
}
