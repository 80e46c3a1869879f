use shared::util::{env_or, env_string, split_list};

/// Default request body cap (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Gateway configuration
///
/// # Environment variables
///
/// | Variable | Default |
/// |----------|---------|
/// | PORT | 5000 |
/// | MENU_SERVICE_URL | http://menu-service:5001 |
/// | ORDER_SERVICE_URL | http://order-service:5002 |
/// | RESERVATION_SERVICE_URL | http://reservation-service:5003 |
/// | CONTACT_SERVICE_URL | http://contact-service:5004 |
/// | UPSTREAM_TIMEOUT_MS | 5000 |
/// | GATEWAY_MAX_BODY_BYTES | 10485760 |
/// | CORS_ALLOWED_ORIGINS | (permissive) |
/// | ENVIRONMENT | development |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub menu_service_url: String,
    pub order_service_url: String,
    pub reservation_service_url: String,
    pub contact_service_url: String,
    /// Whole-request budget for one upstream call
    pub upstream_timeout_ms: u64,
    pub max_body_bytes: usize,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 5000,
            menu_service_url: "http://menu-service:5001".to_string(),
            order_service_url: "http://order-service:5002".to_string(),
            reservation_service_url: "http://reservation-service:5003".to_string(),
            contact_service_url: "http://contact-service:5004".to_string(),
            upstream_timeout_ms: 5000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors_allowed_origins: Vec::new(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            http_port: env_or("PORT", defaults.http_port),
            menu_service_url: env_string("MENU_SERVICE_URL").unwrap_or(defaults.menu_service_url),
            order_service_url: env_string("ORDER_SERVICE_URL")
                .unwrap_or(defaults.order_service_url),
            reservation_service_url: env_string("RESERVATION_SERVICE_URL")
                .unwrap_or(defaults.reservation_service_url),
            contact_service_url: env_string("CONTACT_SERVICE_URL")
                .unwrap_or(defaults.contact_service_url),
            upstream_timeout_ms: env_or("UPSTREAM_TIMEOUT_MS", defaults.upstream_timeout_ms),
            max_body_bytes: env_or("GATEWAY_MAX_BODY_BYTES", defaults.max_body_bytes),
            cors_allowed_origins: env_string("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
            environment: env_string("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }
}
