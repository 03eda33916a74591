//! Remote form download.
//!
//! Retrieves a spreadsheet form from a caller-supplied URL, buffers it whole,
//! and derives a normalized filename for the rest of the pipeline. The source
//! URL is untrusted input; hardened deployments should allow-list destination
//! hosts before exposing this on a network boundary.

mod error;
mod service;

pub use error::FetchError;
pub use service::{FetchedForm, FormFetcher, HttpFetcher, filename_from_url, normalize_filename};
