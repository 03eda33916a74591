//! Conversion pipeline implementation.

use std::sync::Arc;

use bytes::Bytes;
use formgate_shared::Environment;
use tracing::info;

use super::error::PipelineError;
use crate::convert::FormConverter;
use crate::fetch::FormFetcher;
use crate::storage::{ObjectStore, object_basename};

/// Content type for persisted conversion output.
const XFORM_CONTENT_TYPE: &str = "application/xml";

/// The fetch -> convert -> persist pipeline.
///
/// Holds shared, immutable collaborators; each `run` call is independent and
/// the pipeline is safe to share across many in-flight requests. The store
/// is the privileged one: conversion output never goes through presigned
/// URLs.
pub struct ConvertPipeline<F, C, S> {
    fetcher: Arc<F>,
    converter: Arc<C>,
    store: Arc<S>,
    environment: Environment,
}

impl<F, C, S> ConvertPipeline<F, C, S>
where
    F: FormFetcher,
    C: FormConverter,
    S: ObjectStore,
{
    /// Create a pipeline.
    #[must_use]
    pub fn new(
        fetcher: Arc<F>,
        converter: Arc<C>,
        store: Arc<S>,
        environment: Environment,
    ) -> Self {
        Self {
            fetcher,
            converter,
            store,
            environment,
        }
    }

    /// Run the full pipeline for one source URL.
    ///
    /// Returns the public URL of the stored XForm.
    ///
    /// # Errors
    ///
    /// Returns a stage-tagged error from the first stage that fails; later
    /// stages are not attempted.
    pub async fn run(&self, form_url: &str) -> Result<String, PipelineError> {
        let form = self.fetcher.fetch(form_url).await?;

        let xml = self.converter.convert(&form).await?;

        let key = output_key(self.environment, &form.filename);
        let url = self
            .store
            .put_object(&key, Bytes::from(xml), XFORM_CONTENT_TYPE)
            .await?;

        info!(
            form_url,
            filename = %form.filename,
            key,
            url,
            environment = ?self.environment,
            "Stored converted form"
        );

        Ok(url)
    }
}

/// Compute the output key for a converted form.
///
/// Pure function of the environment flag and the input filename: same
/// basename, `.xml` extension, under `xforms/` in production or
/// `xforms/staging/` in development. No randomness, no counters.
#[must_use]
pub fn output_key(environment: Environment, filename: &str) -> String {
    let base = object_basename(filename);
    let stem = base.rsplit_once('.').map_or(base.as_str(), |(stem, _)| stem);

    if environment.is_development() {
        format!("xforms/staging/{stem}.xml")
    } else {
        format!("xforms/{stem}.xml")
    }
}
