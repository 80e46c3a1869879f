use std::path::PathBuf;

use shared::util::{env_or, env_string, split_list};

use crate::resource::Resource;

/// Default upload cap (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Resource service configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | PORT | per resource (5001-5004) | HTTP listen port |
/// | DATABASE_URL | sqlite://data/restaurant.db?mode=rwc | document store |
/// | DATABASE_MAX_CONNECTIONS | 5 | pool size |
/// | UPLOAD_DIR | uploads | menu image directory |
/// | MAX_UPLOAD_BYTES | 5242880 | per-image cap |
/// | CORS_ALLOWED_ORIGINS | (permissive) | comma-separated origins |
/// | ENVIRONMENT | development | development / staging / production |
#[derive(Debug, Clone)]
pub struct Config {
    pub resource: Resource,
    pub http_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
    pub environment: String,
}

impl Config {
    /// Built-in defaults, no environment lookups
    pub fn defaults(resource: Resource) -> Self {
        Self {
            resource,
            http_port: resource.default_port(),
            database_url: "sqlite://data/restaurant.db?mode=rwc".to_string(),
            database_max_connections: 5,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_allowed_origins: Vec::new(),
            environment: "development".to_string(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env(resource: Resource) -> Self {
        let defaults = Self::defaults(resource);
        Self {
            resource,
            http_port: env_or("PORT", defaults.http_port),
            database_url: env_string("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: env_or(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            upload_dir: env_string("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            cors_allowed_origins: env_string("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
            environment: env_string("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
