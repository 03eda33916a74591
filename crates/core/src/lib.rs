//! Core pipeline logic for FormGate.
//!
//! This crate contains the storage gateway, the remote fetcher, the conversion
//! engine client, and the pipeline that chains them. No HTTP server code lives
//! here; the `api` crate owns routing and the request surface.
//!
//! # Modules
//!
//! - `storage` - Capability-scoped object store gateway (presigning, direct writes)
//! - `fetch` - Remote form download and filename normalization
//! - `convert` - Conversion engine client and outcome classification
//! - `pipeline` - Fetch -> convert -> persist orchestration

pub mod convert;
pub mod fetch;
pub mod pipeline;
pub mod storage;
