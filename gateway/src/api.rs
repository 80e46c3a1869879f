//! Gateway-owned endpoints and the dispatching fallback

use axum::Json;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use shared::HealthResponse;

use crate::proxy;
use crate::server::GatewayState;

/// Endpoints advertised by the informational response
pub const ADVERTISED_ENDPOINTS: [&str; 5] = [
    "/api/menu",
    "/api/orders",
    "/api/reservation",
    "/api/contact",
    "/health",
];

/// Body for any path no route claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

impl GatewayInfo {
    pub fn current() -> Self {
        Self {
            message: "API Gateway is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: ADVERTISED_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback: forward when a route matches, otherwise describe the gateway
pub async fn dispatch(State(state): State<GatewayState>, req: Request) -> Response {
    let Some(target) = state.routes.resolve(req.uri()) else {
        return Json(GatewayInfo::current()).into_response();
    };

    match proxy::forward(&state.client, target, req, state.max_body_bytes).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}
