//! Shared errors and configuration for FormGate.
//!
//! This crate provides common types used across all other crates:
//! - Deployment environment flag
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, Environment};
pub use error::{AppError, AppResult};
