//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for presigned URLs and form conversion
//! - Shared application state
//! - CORS and request tracing layers

pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use formgate_core::convert::FormConverter;
use formgate_core::fetch::FormFetcher;
use formgate_core::pipeline::ConvertPipeline;
use formgate_core::storage::ObjectStore;
use formgate_shared::config::CorsSettings;

/// Application state shared across handlers.
///
/// Generic over the fetch, convert, and storage seams so handlers can be
/// exercised against in-memory fakes.
pub struct AppState<F, C, S> {
    /// Store used for user-facing presigned URLs.
    pub store: Arc<S>,
    /// Fetch, convert, persist pipeline.
    pub pipeline: Arc<ConvertPipeline<F, C, S>>,
    /// Upload bucket name, reported by the health endpoint.
    pub bucket: String,
    /// Upload bucket region, reported by the health endpoint.
    pub region: String,
}

// Derived Clone would require F, C, S: Clone; the Arcs make it unconditional.
impl<F, C, S> Clone for AppState<F, C, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            pipeline: Arc::clone(&self.pipeline),
            bucket: self.bucket.clone(),
            region: self.region.clone(),
        }
    }
}

/// Creates the main application router.
pub fn create_router<F, C, S>(state: AppState<F, C, S>, cors: &CorsSettings) -> Router
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

/// Builds the CORS layer from configured origins; `*` opens to any origin.
fn cors_layer(cors: &CorsSettings) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if cors.allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
