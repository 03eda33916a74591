//! Form conversion route.

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use formgate_core::convert::{ConvertError, FormConverter};
use formgate_core::fetch::FormFetcher;
use formgate_core::pipeline::PipelineError;
use formgate_core::storage::ObjectStore;
use formgate_shared::AppError;

use crate::AppState;
use crate::routes::error_response;

/// Creates the conversion route.
pub fn routes<F, C, S>() -> Router<AppState<F, C, S>>
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    Router::new().route("/api/convert", post(convert_form::<F, C, S>))
}

/// Request body for a conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// URL of the source spreadsheet to convert.
    #[serde(default)]
    pub form_url: String,
}

/// Response for a successful conversion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Public URL of the stored XForm XML.
    pub xform_url: String,
}

/// POST /api/convert - fetch a spreadsheet form, convert it, persist the XML.
async fn convert_form<F, C, S>(
    State(state): State<AppState<F, C, S>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> impl IntoResponse
where
    F: FormFetcher + 'static,
    C: FormConverter + 'static,
    S: ObjectStore + 'static,
{
    let Ok(Json(payload)) = payload else {
        return error_response(&AppError::Validation("Invalid request body".to_string()));
    };

    if payload.form_url.is_empty() {
        return error_response(&AppError::Validation("formUrl is required".to_string()));
    }

    match state.pipeline.run(&payload.form_url).await {
        Ok(xform_url) => {
            info!(form_url = %payload.form_url, xform_url, "Converted form");
            Json(ConvertResponse { xform_url }).into_response()
        }
        Err(e) => {
            let app_err = pipeline_error(&e);
            error!(
                error = %e,
                form_url = %payload.form_url,
                stage = e.stage(),
                code = app_err.error_code(),
                "Conversion pipeline failed"
            );
            error_response(&app_err)
        }
    }
}

/// Maps a pipeline failure to its client-facing error.
///
/// Fetch and store failures get generic messages; conversion failures carry
/// the engine's message so form authors can see what to fix.
fn pipeline_error(err: &PipelineError) -> AppError {
    match err {
        PipelineError::Fetch(_) => AppError::Fetch("Failed to download form".to_string()),
        PipelineError::Convert(e @ ConvertError::Rejected(_)) => {
            AppError::ConversionFailed(format!("Conversion failed: {e}"))
        }
        PipelineError::Convert(e) => {
            AppError::ConversionTransport(format!("Conversion failed: {e}"))
        }
        PipelineError::Store(_) => AppError::Storage("Failed to upload converted form".to_string()),
    }
}
