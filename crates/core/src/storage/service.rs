//! Object store implementation using Apache OpenDAL.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use opendal::{Operator, services};

use super::config::ObjectStoreConfig;
use super::error::StorageError;

/// Presigned URL for upload or download.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method to use (PUT for upload, GET for download).
    pub method: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// Required headers for the request.
    pub headers: HashMap<String, String>,
}

/// Capability-scoped object store.
///
/// One interface, multiple independently credentialed instances. The
/// orchestrator picks an instance explicitly per operation; nothing selects
/// a store implicitly.
pub trait ObjectStore: Send + Sync {
    /// Generate a presigned upload (PUT) URL for a key.
    fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> impl Future<Output = Result<PresignedUrl, StorageError>> + Send;

    /// Generate a presigned download (GET) URL for a key.
    fn presign_download(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<PresignedUrl, StorageError>> + Send;

    /// Write an object server-side and return its public URL.
    fn put_object(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<String, StorageError>> + Send;

    /// Compute the public URL for a key without touching the store.
    fn object_url(&self, key: &str) -> String;

    /// The bucket this store writes to.
    fn bucket(&self) -> &str;
}

/// S3-compatible object store.
///
/// Holds two OpenDAL operators: one against the internal endpoint for direct
/// writes, and one against the externally reachable endpoint for presigning.
/// They are the same operator unless a distinct external endpoint is
/// configured.
pub struct S3Store {
    op: Operator,
    presign_op: Operator,
    config: ObjectStoreConfig,
}

impl S3Store {
    /// Create a store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the S3 operator cannot be initialized.
    pub fn from_config(config: ObjectStoreConfig) -> Result<Self, StorageError> {
        let op = Self::create_operator(&config, config.endpoint.as_deref())?;

        let presign_op = match &config.external_endpoint {
            Some(external) if config.endpoint.as_deref() != Some(external.as_str()) => {
                Self::create_operator(&config, Some(external))?
            }
            _ => op.clone(),
        };

        Ok(Self {
            op,
            presign_op,
            config,
        })
    }

    /// Build an OpenDAL S3 operator against the given endpoint.
    fn create_operator(
        config: &ObjectStoreConfig,
        endpoint: Option<&str>,
    ) -> Result<Operator, StorageError> {
        let mut builder = services::S3::default()
            .bucket(&config.bucket)
            .region(&config.region);

        if let Some(endpoint) = endpoint {
            builder = builder.endpoint(endpoint);
        }

        if !config.access_key_id.is_empty() {
            builder = builder
                .access_key_id(&config.access_key_id)
                .secret_access_key(&config.secret_access_key);
        }

        if !config.path_style {
            builder = builder.enable_virtual_host_style();
        }

        Ok(Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish())
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &ObjectStoreConfig {
        &self.config
    }

    fn expires_at(ttl_secs: u64) -> DateTime<Utc> {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Utc::now() + chrono::Duration::try_seconds(secs).unwrap_or_default()
    }
}

impl ObjectStore for S3Store {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, StorageError> {
        let key = object_basename(key);
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key));
        }
        let ttl = Duration::from_secs(self.config.presign_upload_ttl_secs);

        let presigned = self
            .presign_op
            .presign_write(&key, ttl)
            .await
            .map_err(|e| StorageError::signing(&key, e.to_string()))?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_at: Self::expires_at(self.config.presign_upload_ttl_secs),
            headers,
        })
    }

    async fn presign_download(&self, key: &str) -> Result<PresignedUrl, StorageError> {
        let key = object_basename(key);
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key));
        }
        let ttl = Duration::from_secs(self.config.presign_download_ttl_secs);

        let presigned = self
            .presign_op
            .presign_read(&key, ttl)
            .await
            .map_err(|e| StorageError::signing(&key, e.to_string()))?;

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_at: Self::expires_at(self.config.presign_download_ttl_secs),
            headers: HashMap::new(),
        })
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.op
            .write_with(key, bytes)
            .content_type(content_type)
            .await
            .map_err(|e| StorageError::write(key, e.to_string()))?;

        Ok(self.config.object_url(key))
    }

    fn object_url(&self, key: &str) -> String {
        self.config.object_url(key)
    }

    fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

/// Reduce a caller-supplied filename to its basename.
///
/// Keys derived from untrusted filenames must never carry path components;
/// both separator styles are stripped. A name made up entirely of separators
/// reduces to the empty string, which the store rejects before signing.
#[must_use]
pub fn object_basename(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
        .to_string()
}
