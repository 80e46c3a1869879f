//! Resource services for the restaurant platform
//!
//! One library serves all four resources (menu, orders, reservations,
//! contact messages). Each binary in `src/bin` picks a [`Resource`] and
//! calls [`run`], which wires configuration, the document store and the
//! HTTP API for that resource only.
//!
//! # Module layout
//!
//! ```text
//! resource-server/src/
//! ├── core/      # config, state, server lifecycle
//! ├── db/        # SQLite document store + typed repository
//! ├── api/       # HTTP routes per resource
//! └── utils/     # validation, extractors, money rounding
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod resource;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use resource::Resource;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boot one resource service and serve until a shutdown signal arrives.
pub async fn run(resource: Resource) -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let _log_guard = shared::logging::init_logger(&shared::logging::LogConfig::from_env(
        resource.service_name(),
    ));

    let config = Config::from_env(resource);
    tracing::info!(
        "Starting {} (env: {})",
        resource.service_name(),
        config.environment
    );

    let server = Server::new(config).await?;
    server.run(shared::shutdown_signal()).await
}
