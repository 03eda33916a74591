//! Shared fakes for route tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use bytes::Bytes;
use chrono::{Duration, Utc};

use formgate_core::convert::{ConvertError, FormConverter};
use formgate_core::fetch::{FetchError, FetchedForm, FormFetcher};
use formgate_core::pipeline::ConvertPipeline;
use formgate_core::storage::{ObjectStore, PresignedUrl, StorageError};
use formgate_shared::Environment;
use formgate_shared::config::CorsSettings;

use crate::{AppState, create_router};

/// Knobs for building a routed app backed by fakes.
pub struct TestState {
    /// Filename the fake fetcher reports.
    pub filename: String,
    /// Make the fetch stage fail with a transport error.
    pub fetch_fails: bool,
    /// Conversion outcome; `Err` becomes an engine rejection.
    pub convert_result: Result<String, String>,
    /// Make both presign operations fail.
    pub fail_presign: bool,
    /// Make `put_object` fail.
    pub fail_put: bool,
    /// Recorded `put_object` calls as (key, byte length, content type).
    pub puts: Arc<Mutex<Vec<(String, usize, String)>>>,
    /// Environment the pipeline runs as.
    pub environment: Environment,
}

impl Default for TestState {
    fn default() -> Self {
        Self {
            filename: "survey.xlsx".to_string(),
            fetch_fails: false,
            convert_result: Ok("<h:html/>".to_string()),
            fail_presign: false,
            fail_put: false,
            puts: Arc::new(Mutex::new(Vec::new())),
            environment: Environment::Production,
        }
    }
}

pub struct FakeFetcher {
    fails: bool,
    filename: String,
}

impl FormFetcher for FakeFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedForm, FetchError> {
        if self.fails {
            return Err(FetchError::Transport("connection refused".to_string()));
        }
        Ok(FetchedForm {
            bytes: Bytes::from(vec![0x50, 0x4B, 0x03, 0x04]),
            filename: self.filename.clone(),
        })
    }
}

pub struct FakeConverter {
    result: Result<String, String>,
}

impl FormConverter for FakeConverter {
    async fn convert(&self, _form: &FetchedForm) -> Result<String, ConvertError> {
        match &self.result {
            Ok(xml) => Ok(xml.clone()),
            Err(message) => Err(ConvertError::Rejected(message.clone())),
        }
    }
}

pub struct FakeStore {
    fail_presign: bool,
    fail_put: bool,
    puts: Arc<Mutex<Vec<(String, usize, String)>>>,
}

impl FakeStore {
    fn presigned(
        &self,
        key: &str,
        method: &str,
        headers: HashMap<String, String>,
    ) -> Result<PresignedUrl, StorageError> {
        if self.fail_presign {
            return Err(StorageError::signing(key, "mock signing failure"));
        }
        Ok(PresignedUrl {
            url: format!("https://minio.local/xlsforms/{key}?sig=mock"),
            method: method.to_string(),
            expires_at: Utc::now() + Duration::minutes(15),
            headers,
        })
    }
}

impl ObjectStore for FakeStore {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, StorageError> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        self.presigned(key, "PUT", headers)
    }

    async fn presign_download(&self, key: &str) -> Result<PresignedUrl, StorageError> {
        self.presigned(key, "GET", HashMap::new())
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail_put {
            return Err(StorageError::write(key, "access denied"));
        }
        self.puts.lock().expect("lock").push((
            key.to_string(),
            bytes.len(),
            content_type.to_string(),
        ));
        Ok(self.object_url(key))
    }

    fn object_url(&self, key: &str) -> String {
        format!("https://xlsforms.s3.amazonaws.com/{key}")
    }

    fn bucket(&self) -> &str {
        "xlsforms"
    }
}

/// Builds the full router over fakes configured by `cfg`.
pub fn router(cfg: &TestState) -> Router {
    let store = Arc::new(FakeStore {
        fail_presign: cfg.fail_presign,
        fail_put: cfg.fail_put,
        puts: Arc::clone(&cfg.puts),
    });
    let fetcher = Arc::new(FakeFetcher {
        fails: cfg.fetch_fails,
        filename: cfg.filename.clone(),
    });
    let converter = Arc::new(FakeConverter {
        result: cfg.convert_result.clone(),
    });
    let pipeline = Arc::new(ConvertPipeline::new(
        fetcher,
        converter,
        Arc::clone(&store),
        cfg.environment,
    ));

    let state = AppState {
        store,
        pipeline,
        bucket: "xlsforms".to_string(),
        region: "us-east-1".to_string(),
    };
    create_router(state, &CorsSettings::default())
}
