//! Form download and filename normalization.

use std::future::Future;

use bytes::Bytes;
use tracing::{info, warn};

use super::error::FetchError;

/// Extensions the conversion engine accepts.
const ALLOWED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "xlsm"];

/// ZIP local-file-header magic; the leading bytes of any OOXML workbook.
const ZIP_MAGIC: [u8; 2] = [0x50, 0x4B];

/// A downloaded spreadsheet form.
#[derive(Debug, Clone)]
pub struct FetchedForm {
    /// Raw document bytes, buffered whole.
    pub bytes: Bytes,
    /// Normalized filename (basename-only, extension coerced).
    pub filename: String,
}

impl FetchedForm {
    /// Filename without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map_or(self.filename.as_str(), |(stem, _)| stem)
    }

    /// Extension of the normalized filename, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.filename.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Source form fetcher.
pub trait FormFetcher: Send + Sync {
    /// Download the form at `url` and derive its normalized filename.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedForm, FetchError>> + Send;
}

/// HTTP fetcher over a shared reqwest client.
///
/// Performs a single GET with transport-default redirect handling and no
/// explicit timeout; the whole body lands in memory.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher over an existing client.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl FormFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedForm, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let filename = normalize_filename(&filename_from_url(url));

        // Advisory only: legacy .xls files are legitimately not ZIP-based,
        // so a failed sniff never blocks the pipeline.
        if bytes.len() < ZIP_MAGIC.len() || bytes[..ZIP_MAGIC.len()] != ZIP_MAGIC {
            warn!(
                url,
                filename,
                bytes = bytes.len(),
                leading = ?bytes.get(..2),
                "downloaded form does not look like a ZIP/XLSX"
            );
        }

        info!(url, filename, bytes = bytes.len(), "Downloaded form");

        Ok(FetchedForm { bytes, filename })
    }
}

/// Derive a filename from the last segment of a URL path.
///
/// The query string and fragment are stripped; a URL with no usable last
/// segment falls back to `form`.
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    let without_query = url
        .split_once(['?', '#'])
        .map_or(url, |(path, _)| path)
        .trim_end_matches('/');

    let segment = without_query
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("form");

    segment.to_string()
}

/// Coerce a filename's extension into the accepted set.
///
/// No extension appends `.xlsx`; an unrecognized one is replaced with
/// `.xlsx`; an accepted one is left untouched. The check is case-sensitive
/// and the document bytes are never altered, so this is naming
/// normalization, not format conversion. Idempotent by construction.
#[must_use]
pub fn normalize_filename(name: &str) -> String {
    match name.rsplit_once('.') {
        None => format!("{name}.xlsx"),
        Some((stem, ext)) if !ALLOWED_EXTENSIONS.contains(&ext) => format!("{stem}.xlsx"),
        Some(_) => name.to_string(),
    }
}
