//! Server lifecycle and middleware stack

use std::future::Future;
use std::time::Instant;

use axum::{Router, middleware};
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::BoxError;
use crate::core::{Config, ServerState};

/// HTTP access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        "{} {} {} {}ms",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );

    response
}

/// CORS from configuration: any origin when the list is empty
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router with state and middleware
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);
    crate::api::router(&state.config).with_state(state).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(log_request))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(CompressionLayer::new()),
    )
}

/// One resource service process
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Open the store and prepare state. Fails fast when the store is
    /// unusable so the process never serves without persistence.
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        if config.is_production() && config.cors_allowed_origins.is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is unset, accepting any origin");
        }
        let state = ServerState::initialize(config.clone()).await?;
        tracing::info!(
            resource = %config.resource,
            collection = config.resource.collection(),
            "Document store ready"
        );
        Ok(Self { config, state })
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    pub fn router(&self) -> Router {
        build_app(self.state.clone())
    }

    /// Bind the configured port and serve until `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> Result<(), BoxError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("0.0.0.0:{}", self.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("{} listening on {addr}", self.config.resource);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        self.state.db.pool.close().await;
        tracing::info!("{} stopped", self.config.resource);
        Ok(())
    }
}
