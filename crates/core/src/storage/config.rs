//! Object store configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for one object store instance.
///
/// `endpoint` of `None` means plain AWS S3 with virtual-hosted addressing.
/// When the service reaches storage over an internal address (e.g. a Docker
/// network hostname) but browsers must use a public one, set
/// `external_endpoint`; presigned URLs and public links are then built
/// against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    /// Bucket name.
    pub bucket: String,
    /// AWS region.
    pub region: String,
    /// Access key ID (empty = ambient credentials).
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Internal endpoint URL (None = AWS S3).
    pub endpoint: Option<String>,
    /// Externally reachable endpoint for presigning and public URLs.
    pub external_endpoint: Option<String>,
    /// Use path-style addressing (required by most non-AWS stores).
    pub path_style: bool,
    /// Presigned upload URL TTL in seconds.
    pub presign_upload_ttl_secs: u64,
    /// Presigned download URL TTL in seconds.
    pub presign_download_ttl_secs: u64,
}

impl ObjectStoreConfig {
    /// Default upload TTL: 15 minutes.
    pub const DEFAULT_UPLOAD_TTL: u64 = 900;
    /// Default download TTL: 1 hour.
    pub const DEFAULT_DOWNLOAD_TTL: u64 = 3600;

    /// Create a config for plain AWS S3 with default TTLs.
    #[must_use]
    pub fn new(
        bucket: impl Into<String>,
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            endpoint: None,
            external_endpoint: None,
            path_style: false,
            presign_upload_ttl_secs: Self::DEFAULT_UPLOAD_TTL,
            presign_download_ttl_secs: Self::DEFAULT_DOWNLOAD_TTL,
        }
    }

    /// Set the internal endpoint (S3-compatible store).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the externally reachable endpoint.
    #[must_use]
    pub fn with_external_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.external_endpoint = Some(endpoint.into());
        self
    }

    /// Enable path-style addressing.
    #[must_use]
    pub const fn with_path_style(mut self, path_style: bool) -> Self {
        self.path_style = path_style;
        self
    }

    /// Set presigned upload URL TTL.
    #[must_use]
    pub const fn with_upload_ttl(mut self, secs: u64) -> Self {
        self.presign_upload_ttl_secs = secs;
        self
    }

    /// Set presigned download URL TTL.
    #[must_use]
    pub const fn with_download_ttl(mut self, secs: u64) -> Self {
        self.presign_download_ttl_secs = secs;
        self
    }

    /// The endpoint clients outside the deployment can reach, if any.
    ///
    /// Falls back to the internal endpoint when no distinct external one is
    /// configured; `None` means plain AWS.
    #[must_use]
    pub fn public_endpoint(&self) -> Option<&str> {
        self.external_endpoint
            .as_deref()
            .or(self.endpoint.as_deref())
    }

    /// Compute the public URL for an object.
    ///
    /// Path-style off the public endpoint when one is configured, otherwise
    /// virtual-hosted AWS addressing.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        match self.public_endpoint() {
            Some(endpoint) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            }
            None => format!("https://{}.s3.amazonaws.com/{}", self.bucket, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ObjectStoreConfig::new("xlsforms", "us-east-1", "key", "secret");
        assert_eq!(
            config.presign_upload_ttl_secs,
            ObjectStoreConfig::DEFAULT_UPLOAD_TTL
        );
        assert_eq!(
            config.presign_download_ttl_secs,
            ObjectStoreConfig::DEFAULT_DOWNLOAD_TTL
        );
        assert!(config.endpoint.is_none());
        assert!(!config.path_style);
    }

    #[test]
    fn test_object_url_virtual_hosted() {
        let config = ObjectStoreConfig::new("xlsforms", "us-east-1", "key", "secret");
        assert_eq!(
            config.object_url("xforms/survey.xml"),
            "https://xlsforms.s3.amazonaws.com/xforms/survey.xml"
        );
    }

    #[test]
    fn test_object_url_path_style_internal_endpoint() {
        let config = ObjectStoreConfig::new("xlsforms", "us-east-1", "key", "secret")
            .with_endpoint("http://minio:9000")
            .with_path_style(true);
        assert_eq!(
            config.object_url("survey.xlsx"),
            "http://minio:9000/xlsforms/survey.xlsx"
        );
    }

    #[test]
    fn test_object_url_prefers_external_endpoint() {
        let config = ObjectStoreConfig::new("xlsforms", "us-east-1", "key", "secret")
            .with_endpoint("http://minio:9000")
            .with_external_endpoint("http://localhost:9000/")
            .with_path_style(true);
        assert_eq!(
            config.object_url("survey.xlsx"),
            "http://localhost:9000/xlsforms/survey.xlsx"
        );
        assert_eq!(config.public_endpoint(), Some("http://localhost:9000/"));
    }
}
