//! Conversion engine HTTP client.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use super::error::ConvertError;
use super::types::{ConversionOutcome, ConverterResponse, classify};
use crate::fetch::FetchedForm;

/// OOXML spreadsheet MIME type (`.xlsx`, `.xlsm`).
const OOXML_SHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Legacy binary Excel MIME type (`.xls`).
const LEGACY_XLS_MIME: &str = "application/vnd.ms-excel";

/// Fallback form identifier header.
///
/// Gives the engine a deterministic form id even when the workbook's own
/// settings sheet lacks one.
const FORM_ID_FALLBACK_HEADER: &str = "X-XlsForm-FormId-Fallback";

/// Cap on engine response bodies echoed into error messages.
const BODY_EXCERPT_LIMIT: usize = 512;

/// Conversion engine configuration.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Engine endpoint URL.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ConverterConfig {
    /// Default request timeout: 30 seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a config with the default timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Form converter seam.
pub trait FormConverter: Send + Sync {
    /// Submit a form and return the converted XForm XML.
    fn convert(&self, form: &FetchedForm)
    -> impl Future<Output = Result<String, ConvertError>> + Send;
}

/// HTTP client for the conversion engine.
#[derive(Debug, Clone)]
pub struct ConverterClient {
    client: reqwest::Client,
    config: ConverterConfig,
}

impl ConverterClient {
    /// Create a client over an existing reqwest client.
    #[must_use]
    pub fn new(client: reqwest::Client, config: ConverterConfig) -> Self {
        Self { client, config }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }
}

impl FormConverter for ConverterClient {
    async fn convert(&self, form: &FetchedForm) -> Result<String, ConvertError> {
        let content_type = content_type_for(form.extension());

        debug!(
            endpoint = %self.config.endpoint,
            filename = %form.filename,
            content_type,
            bytes = form.bytes.len(),
            "Submitting form for conversion"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(FORM_ID_FALLBACK_HEADER, form.stem())
            .timeout(self.timeout())
            .body(form.bytes.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ConvertError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    ConvertError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ConvertError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ConvertError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let parsed: ConverterResponse =
            serde_json::from_str(&body).map_err(|e| ConvertError::Parse(e.to_string()))?;

        match classify(&parsed) {
            ConversionOutcome::Success(xml) => {
                info!(
                    filename = %form.filename,
                    xml_bytes = xml.len(),
                    "Form converted"
                );
                Ok(xml)
            }
            ConversionOutcome::Failure(detail) => Err(ConvertError::Rejected(detail)),
        }
    }
}

/// Resolve the request content type from the normalized extension.
///
/// Normalization already forces one of the accepted extensions, so the
/// OOXML fallback only covers defensive call sites.
#[must_use]
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("xls") => LEGACY_XLS_MIME,
        _ => OOXML_SHEET_MIME,
    }
}

/// Truncate a response body for inclusion in error messages.
fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LIMIT {
        return body.to_string();
    }
    let mut end = BODY_EXCERPT_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
