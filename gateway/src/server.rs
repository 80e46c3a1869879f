//! Gateway state, middleware stack and lifecycle

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::DefaultBodyLimit;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, middleware};
use http::{HeaderValue, StatusCode};
use shared::ErrorCode;
use shared::error::ErrorBody;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::BoxError;
use crate::api;
use crate::config::Config;
use crate::routes::RouteTable;

/// Shared by every request
#[derive(Clone, Debug)]
pub struct GatewayState {
    pub routes: Arc<RouteTable>,
    /// One pooled client for all upstreams
    pub client: reqwest::Client,
    pub max_body_bytes: usize,
}

impl GatewayState {
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.upstream_timeout_ms))
            .connect_timeout(Duration::from_millis(config.upstream_timeout_ms))
            // Redirects are relayed to the caller, not followed
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            routes: Arc::new(RouteTable::from_config(config)),
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

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

/// Render a handler panic as the generic 500 body; details stay in the log
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> http::Response<axum::body::Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Request handling panicked");

    let body = ErrorBody::with_message(ErrorCode::InternalError, "Something went wrong!");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

/// Build the gateway router around extra routes.
///
/// `extra` is merged before the fallback; the binary passes an empty
/// router.
pub fn build_app_with(state: GatewayState, config: &Config, extra: Router<GatewayState>) -> Router {
    let max_body_bytes = state.max_body_bytes;

    // Outermost first
    let layers = ServiceBuilder::new()
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .route("/health", get(api::health))
        .merge(extra)
        .fallback(api::dispatch)
        .with_state(state)
        .layer(layers)
}

pub fn build_app(state: GatewayState, config: &Config) -> Router {
    build_app_with(state, config, Router::new())
}

/// The gateway process
pub struct Gateway {
    config: Config,
    state: GatewayState,
}

impl Gateway {
    pub fn new(config: Config) -> Result<Self, BoxError> {
        let state = GatewayState::new(&config)?;
        for route in state.routes.routes() {
            tracing::info!(
                prefix = %route.prefix,
                upstream = %route.upstream,
                url = %route.base_url,
                "Route registered"
            );
        }
        Ok(Self { config, state })
    }

    pub fn router(&self) -> Router {
        build_app(self.state.clone(), &self.config)
    }

    /// Bind the configured port and serve until `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> Result<(), BoxError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("0.0.0.0:{}", self.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("API Gateway listening on {addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("API Gateway stopped");
        Ok(())
    }
}
