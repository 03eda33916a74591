//! Conversion engine client.
//!
//! Submits a spreadsheet form to the external conversion engine over HTTP and
//! classifies the structured JSON response. The engine owns all semantic
//! validation of the form; this module only distinguishes transport problems
//! from a well-formed "your form is invalid" verdict.

mod error;
mod service;
mod types;

pub use error::ConvertError;
pub use service::{ConverterClient, ConverterConfig, FormConverter, content_type_for};
pub use types::{ConversionOutcome, ConverterResponse, classify};
