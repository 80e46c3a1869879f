//! Upstream forwarding
//!
//! The request goes out with its method, body and end-to-end headers;
//! the upstream answer comes back with its status, body and end-to-end
//! headers. Nothing is retried.

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use http::header::{self, HeaderMap, HeaderName};
use http::StatusCode;
use shared::AppError;
use thiserror::Error;

use crate::routes::ResolvedRoute;

/// Headers that describe one hop and never cross the proxy
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Forwarding failures
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("{upstream} unreachable: {source}")]
    Upstream {
        upstream: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl From<ProxyError> for AppError {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::BodyTooLarge(limit) => AppError::payload_too_large(limit),
            ProxyError::Body(msg) => AppError::invalid_request(msg),
            ProxyError::Upstream { upstream, source } => {
                let kind = if source.is_timeout() {
                    "timeout"
                } else if source.is_connect() {
                    "connect"
                } else {
                    "transport"
                };
                tracing::error!(upstream, kind, error = %source, "Proxy error");
                AppError::upstream_unavailable()
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Copy end-to-end headers: drops hop-by-hop headers, anything the
/// `Connection` header names, and framing headers the client recomputes.
pub fn end_to_end_headers(headers: &HeaderMap) -> HeaderMap {
    let named_by_connection: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if HOP_BY_HOP.contains(name)
            || named_by_connection.contains(name)
            || name == header::CONTENT_LENGTH
        {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Forward `req` to the resolved upstream and relay its answer.
///
/// `max_body_bytes` must match the `DefaultBodyLimit` layer in front of
/// the handler; it is only used to report the cap.
pub async fn forward(
    client: &reqwest::Client,
    target: ResolvedRoute<'_>,
    req: Request,
    max_body_bytes: usize,
) -> Result<Response, ProxyError> {
    let upstream = target.route.upstream.name();
    let method = req.method().clone();

    let mut headers = end_to_end_headers(req.headers());
    if let Some(host) = req.headers().get(header::HOST) {
        headers.insert(HeaderName::from_static("x-forwarded-host"), host.clone());
    }
    headers.remove(header::HOST);

    // Honors the DefaultBodyLimit layer
    let body = Bytes::from_request(req, &()).await.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProxyError::BodyTooLarge(max_body_bytes)
        } else {
            ProxyError::Body(rejection.body_text())
        }
    })?;

    tracing::debug!(upstream, method = %method, url = %target.url, "Forwarding request");

    let upstream_response = client
        .request(method, target.url.as_str())
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|source| ProxyError::Upstream { upstream, source })?;

    let status = upstream_response.status();
    let response_headers = end_to_end_headers(upstream_response.headers());
    let bytes = upstream_response
        .bytes()
        .await
        .map_err(|source| ProxyError::Upstream { upstream, source })?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}
