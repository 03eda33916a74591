//! Presigned upload and download URL routes.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use tracing::error;

use formgate_core::convert::FormConverter;
use formgate_core::fetch::FormFetcher;
use formgate_core::storage::{ObjectStore, object_basename};
use formgate_shared::AppError;

use crate::AppState;
use crate::routes::error_response;

/// Creates the presign routes.
pub fn routes<F, C, S>() -> Router<AppState<F, C, S>>
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    Router::new()
        .route("/api/presigned-url", post(presigned_upload_url::<F, C, S>))
        .route(
            "/api/presigned-download-url",
            post(presigned_download_url::<F, C, S>),
        )
}

/// Request body for a presigned upload URL.
///
/// Fields default to empty so an absent field is reported as a 400 rather
/// than a body-extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlRequest {
    /// Name the client wants the object stored under.
    #[serde(default)]
    pub file_name: String,
    /// MIME type the client will send in the upload PUT.
    #[serde(default)]
    pub file_type: String,
}

/// Response for a presigned upload URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlResponse {
    /// Presigned PUT URL, valid for the configured upload TTL.
    pub upload_url: String,
    /// HTTP method the client must use with the URL.
    pub upload_method: String,
    /// Headers the client must send on the upload request.
    pub upload_headers: HashMap<String, String>,
    /// When the presigned URL expires (RFC 3339).
    pub expires_at: String,
    /// Public URL the object will have once uploaded.
    pub file_url: String,
}

/// Request body for a presigned download URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrlRequest {
    /// Name of the object to read.
    #[serde(default)]
    pub file_name: String,
}

/// Response for a presigned download URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrlResponse {
    /// Presigned GET URL, valid for the configured download TTL.
    pub download_url: String,
    /// When the presigned URL expires (RFC 3339).
    pub expires_at: String,
}

/// POST /api/presigned-url - sign an upload URL for a client-side PUT.
async fn presigned_upload_url<F, C, S>(
    State(state): State<AppState<F, C, S>>,
    payload: Result<Json<PresignedUrlRequest>, JsonRejection>,
) -> impl IntoResponse
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    let Ok(Json(payload)) = payload else {
        return error_response(&AppError::Validation("Invalid request body".to_string()));
    };

    let key = object_basename(&payload.file_name);
    if key.is_empty() {
        return error_response(&AppError::Validation("fileName is required".to_string()));
    }

    match state.store.presign_upload(&key, &payload.file_type).await {
        Ok(presigned) => {
            let file_url = state.store.object_url(&key);
            Json(PresignedUrlResponse {
                upload_url: presigned.url,
                upload_method: presigned.method,
                upload_headers: presigned.headers,
                expires_at: presigned.expires_at.to_rfc3339(),
                file_url,
            })
            .into_response()
        }
        Err(e) => {
            let app_err = AppError::Storage("Failed to generate presigned URL".to_string());
            error!(error = %e, key = %key, code = app_err.error_code(), "Failed to generate presigned URL");
            error_response(&app_err)
        }
    }
}

/// POST /api/presigned-download-url - sign a read URL for an uploaded object.
async fn presigned_download_url<F, C, S>(
    State(state): State<AppState<F, C, S>>,
    payload: Result<Json<DownloadUrlRequest>, JsonRejection>,
) -> impl IntoResponse
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    let Ok(Json(payload)) = payload else {
        return error_response(&AppError::Validation("Invalid request body".to_string()));
    };

    let key = object_basename(&payload.file_name);
    if key.is_empty() {
        return error_response(&AppError::Validation("fileName is required".to_string()));
    }

    match state.store.presign_download(&key).await {
        Ok(presigned) => Json(DownloadUrlResponse {
            download_url: presigned.url,
            expires_at: presigned.expires_at.to_rfc3339(),
        })
        .into_response(),
        Err(e) => {
            let app_err = AppError::Storage("Failed to generate presigned download URL".to_string());
            error!(error = %e, key = %key, code = app_err.error_code(), "Failed to generate presigned download URL");
            error_response(&app_err)
        }
    }
}
