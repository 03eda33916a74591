//! Application configuration management.

use serde::Deserialize;

/// Deployment environment flag.
///
/// Controls where converted form output lands in the production bucket:
/// development deployments write under a `staging/` prefix so they never
/// clobber live forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development deployment (output goes to the staging prefix).
    Development,
    /// Production deployment.
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Production
    }
}

impl Environment {
    /// Returns true for development deployments.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// General object storage (user uploads, presigned URLs).
    #[serde(default)]
    pub storage: StorageSettings,
    /// Privileged production storage (converted form output).
    pub production_storage: ProductionStorageSettings,
    /// Conversion engine configuration.
    #[serde(default)]
    pub converter: ConverterSettings,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

/// General object storage settings.
///
/// Points at AWS S3 by default; set `endpoint` for an S3-compatible store
/// such as MinIO. `external_endpoint` covers deployments where the service
/// reaches storage over an internal address but browsers need a public one.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Bucket name.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Internal endpoint URL (None = AWS S3).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Externally reachable endpoint for presigned URLs and public links.
    #[serde(default)]
    pub external_endpoint: Option<String>,
    /// Use path-style addressing (required by most non-AWS stores).
    #[serde(default)]
    pub path_style: bool,
    /// Access key ID (empty = ambient credentials).
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_access_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            external_endpoint: None,
            path_style: false,
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

fn default_bucket() -> String {
    "xlsforms".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Privileged production storage settings.
///
/// Always AWS S3; conversion output is written server-side with these
/// credentials, never through presigned URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionStorageSettings {
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name (defaults to the general storage bucket).
    #[serde(default)]
    pub bucket: Option<String>,
}

/// Conversion engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterSettings {
    /// Engine endpoint URL.
    #[serde(default = "default_converter_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_converter_timeout")]
    pub timeout_secs: u64,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            endpoint: default_converter_endpoint(),
            timeout_secs: default_converter_timeout(),
        }
    }
}

fn default_converter_endpoint() -> String {
    "http://pyxform:80/api/v1/convert".to_string()
}

fn default_converter_timeout() -> u64 {
    30
}

/// CORS settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins; `*` allows any origin.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_origins(),
        }
    }
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FORMGATE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_default_is_production() {
        assert_eq!(Environment::default(), Environment::Production);
        assert!(!Environment::default().is_development());
        assert!(Environment::Development.is_development());
    }

    #[test]
    fn test_server_config_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 3001);
    }

    #[test]
    fn test_storage_settings_defaults() {
        let storage = StorageSettings::default();
        assert_eq!(storage.bucket, "xlsforms");
        assert_eq!(storage.region, "us-east-1");
        assert!(storage.endpoint.is_none());
        assert!(storage.external_endpoint.is_none());
        assert!(!storage.path_style);
    }

    #[test]
    fn test_converter_settings_defaults() {
        let converter = ConverterSettings::default();
        assert_eq!(converter.endpoint, "http://pyxform:80/api/v1/convert");
        assert_eq!(converter.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                (
                    "FORMGATE__PRODUCTION_STORAGE__ACCESS_KEY_ID",
                    Some("prod-key"),
                ),
                (
                    "FORMGATE__PRODUCTION_STORAGE__SECRET_ACCESS_KEY",
                    Some("prod-secret"),
                ),
                ("FORMGATE__STORAGE__BUCKET", Some("forms-dev")),
                ("FORMGATE__STORAGE__PATH_STYLE", Some("true")),
                ("FORMGATE__ENVIRONMENT", Some("development")),
                ("FORMGATE__SERVER__PORT", Some("4001")),
            ],
            || {
                let config = AppConfig::load().expect("should load config");
                assert_eq!(config.production_storage.access_key_id, "prod-key");
                assert_eq!(config.storage.bucket, "forms-dev");
                assert!(config.storage.path_style);
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 4001);
            },
        );
    }

    #[test]
    fn test_environment_deserialize() {
        let env: Environment = serde_json::from_str("\"development\"").expect("should parse");
        assert_eq!(env, Environment::Development);
        let env: Environment = serde_json::from_str("\"production\"").expect("should parse");
        assert_eq!(env, Environment::Production);
    }
}
