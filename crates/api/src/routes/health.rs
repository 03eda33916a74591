//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use formgate_core::convert::FormConverter;
use formgate_core::fetch::FormFetcher;
use formgate_core::storage::ObjectStore;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Upload bucket name.
    pub bucket: String,
    /// Upload bucket region.
    pub region: String,
}

/// Health check handler.
async fn health_check<F, C, S>(State(state): State<AppState<F, C, S>>) -> Json<HealthResponse>
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    Json(HealthResponse {
        status: "healthy",
        bucket: state.bucket,
        region: state.region,
    })
}

/// Creates health check routes.
pub fn routes<F, C, S>() -> Router<AppState<F, C, S>>
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    Router::new().route("/health", get(health_check::<F, C, S>))
}
