//! Capability-scoped object store gateway built on Apache OpenDAL.
//!
//! Two independently credentialed instances of one abstraction:
//! - a general store for user uploads (S3-compatible, possibly MinIO behind an
//!   internal endpoint with a distinct externally reachable one), and
//! - a privileged production store that only ever receives conversion output
//!   through direct server-side writes.
//!
//! The store issues time-limited presigned URLs so large payloads travel
//! client-direct instead of through this service.

mod config;
mod error;
mod service;

pub use config::ObjectStoreConfig;
pub use error::StorageError;
pub use service::{ObjectStore, PresignedUrl, S3Store, object_basename};
