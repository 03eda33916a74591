//! Fetch -> convert -> persist orchestration.
//!
//! One pipeline run spans exactly one inbound request; no state survives it.
//! Stages execute strictly in sequence, nothing is retried, and the first
//! failure short-circuits with a stage-tagged error. A persist failure after
//! a successful conversion discards the produced XML; the caller resubmits
//! if it cares.

mod error;
mod service;

pub use error::PipelineError;
pub use service::{ConvertPipeline, output_key};
