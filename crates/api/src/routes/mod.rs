//! API route definitions.

use axum::{Json, Router, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

use formgate_core::convert::FormConverter;
use formgate_core::fetch::FormFetcher;
use formgate_core::storage::ObjectStore;
use formgate_shared::AppError;

use crate::AppState;

pub mod convert;
pub mod health;
pub mod presign;

#[cfg(test)]
pub(crate) mod test_support;

/// Creates the API router with all routes.
pub fn api_routes<F, C, S>() -> Router<AppState<F, C, S>>
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    Router::new()
        .merge(health::routes())
        .merge(presign::routes())
        .merge(convert::routes())
}

/// Renders an error as its HTTP response: `{"error": "<message>"}`.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
