//! FormGate API Server
//!
//! Main entry point for the FormGate gateway service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formgate_api::{AppState, create_router};
use formgate_core::convert::{ConverterClient, ConverterConfig};
use formgate_core::fetch::HttpFetcher;
use formgate_core::pipeline::ConvertPipeline;
use formgate_core::storage::{ObjectStoreConfig, S3Store};
use formgate_shared::AppConfig;
use formgate_shared::config::{ProductionStorageSettings, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // General store: user uploads via presigned URLs
    let store = Arc::new(S3Store::from_config(general_store_config(&config.storage))?);
    info!(
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        endpoint = ?config.storage.endpoint,
        "General object store configured"
    );

    // Privileged store: conversion output, written server-side only
    let production_store = Arc::new(S3Store::from_config(production_store_config(
        &config.production_storage,
        &config.storage,
    ))?);

    // Shared HTTP client for source fetches and the conversion engine
    let http_client = reqwest::Client::new();
    let fetcher = Arc::new(HttpFetcher::new(http_client.clone()));
    let converter = Arc::new(ConverterClient::new(
        http_client,
        ConverterConfig::new(&config.converter.endpoint)
            .with_timeout_secs(config.converter.timeout_secs),
    ));
    info!(
        endpoint = %config.converter.endpoint,
        environment = ?config.environment,
        "Conversion engine configured"
    );

    let pipeline = Arc::new(ConvertPipeline::new(
        fetcher,
        converter,
        production_store,
        config.environment,
    ));

    // Create application state
    let state = AppState {
        store,
        pipeline,
        bucket: config.storage.bucket.clone(),
        region: config.storage.region.clone(),
    };

    // Create router
    let app = create_router(state, &config.cors);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Store config for user-facing presigned URLs.
fn general_store_config(settings: &StorageSettings) -> ObjectStoreConfig {
    let mut config = ObjectStoreConfig::new(
        &settings.bucket,
        &settings.region,
        &settings.access_key_id,
        &settings.secret_access_key,
    )
    .with_path_style(settings.path_style);
    if let Some(endpoint) = &settings.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(endpoint) = &settings.external_endpoint {
        config = config.with_external_endpoint(endpoint);
    }
    config
}

/// Store config for conversion output.
///
/// Always plain AWS S3; falls back to the general bucket name when no
/// dedicated one is configured.
fn production_store_config(
    settings: &ProductionStorageSettings,
    general: &StorageSettings,
) -> ObjectStoreConfig {
    let bucket = settings.bucket.as_deref().unwrap_or(&general.bucket);
    ObjectStoreConfig::new(
        bucket,
        &settings.region,
        &settings.access_key_id,
        &settings.secret_access_key,
    )
}
