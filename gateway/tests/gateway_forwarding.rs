//! End-to-end forwarding against live mock upstreams

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use gateway::{Config, GatewayState};
use http::{HeaderMap, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Echoes what it received, tagged with its own name
async fn echo(State(name): State<&'static str>, req: Request) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let headers: BTreeMap<String, String> = req
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let body = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    if path.ends_with("/missing") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": "Order not found", "code": 3 })),
        )
            .into_response();
    }

    let status = if method == "POST" {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let payload = json!({
        "service": name,
        "method": method,
        "path": path,
        "query": query,
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    });
    (
        status,
        [("x-upstream", name)],
        axum::Json(payload),
    )
        .into_response()
}

async fn spawn_upstream(name: &'static str) -> String {
    let app = Router::new().fallback(echo).with_state(name);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Upstream that answers only after `delay`
async fn spawn_slow_upstream(delay: Duration) -> String {
    let app = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        "late"
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

struct Harness {
    app: Router,
}

impl Harness {
    async fn new(tweak: impl FnOnce(&mut Config)) -> Self {
        Self::with_extra(tweak, Router::new()).await
    }

    async fn with_extra(
        tweak: impl FnOnce(&mut Config),
        extra: Router<GatewayState>,
    ) -> Self {
        let mut config = Config {
            menu_service_url: spawn_upstream("menu").await,
            order_service_url: spawn_upstream("order").await,
            reservation_service_url: spawn_upstream("reservation").await,
            contact_service_url: spawn_upstream("contact").await,
            upstream_timeout_ms: 2000,
            ..Config::default()
        };
        tweak(&mut config);
        let state = GatewayState::new(&config).unwrap();
        Self {
            app: gateway::server::build_app_with(state, &config, extra),
        }
    }

    async fn send(&self, req: http::Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes: Bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Value) {
        self.send(
            http::Request::builder()
                .uri(uri)
                .header(header::HOST, "restaurant.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

#[tokio::test]
async fn test_prefixes_reach_their_own_service() {
    let gw = Harness::new(|_| {}).await;

    for (uri, service) in [
        ("/api/menu", "menu"),
        ("/api/menu/abc", "menu"),
        ("/uploads/1700000000000-pizza.jpg", "menu"),
        ("/api/orders", "order"),
        ("/api/reservation", "reservation"),
        ("/api/contact", "contact"),
    ] {
        let (status, _, body) = gw.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["service"], service, "{uri}");
        assert_eq!(body["path"], uri);
    }
}

#[tokio::test]
async fn test_query_method_and_body_are_forwarded() {
    let gw = Harness::new(|_| {}).await;

    let (status, headers, body) = gw
        .send(
            http::Request::builder()
                .method("POST")
                .uri("/api/orders?source=web")
                .header(header::HOST, "restaurant.test")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-custom", "kept")
                .body(Body::from(r#"{"itemId":"abc","quantity":2}"#))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["path"], "/api/orders");
    assert_eq!(body["query"], "source=web");
    assert_eq!(body["body"], r#"{"itemId":"abc","quantity":2}"#);
    assert_eq!(body["headers"]["x-custom"], "kept");
    assert_eq!(body["headers"]["content-type"], "application/json");
    assert_eq!(body["headers"]["x-forwarded-host"], "restaurant.test");

    assert_eq!(headers["x-upstream"], "order");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert!(headers.get(header::CONNECTION).is_none());
}

#[tokio::test]
async fn test_upstream_error_status_is_relayed() {
    let gw = Harness::new(|_| {}).await;

    let (status, _, body) = gw.get("/api/orders/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Order not found", "code": 3 }));
}

#[tokio::test]
async fn test_unmatched_path_returns_info() {
    let gw = Harness::new(|_| {}).await;

    for uri in ["/", "/api", "/api/menux", "/something/else"] {
        let (status, _, body) = gw.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["message"], "API Gateway is running");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(
            body["endpoints"],
            json!(["/api/menu", "/api/orders", "/api/reservation", "/api/contact", "/health"])
        );
    }
}

#[tokio::test]
async fn test_health_is_answered_locally() {
    let gw = Harness::new(|c| c.menu_service_url = "http://127.0.0.1:1".into()).await;

    let (status, _, body) = gw.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_unreachable_upstream_is_isolated() {
    let gw = Harness::new(|c| c.menu_service_url = "http://127.0.0.1:1".into()).await;

    let (status, _, body) = gw.get("/api/menu").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({ "error": "Service temporarily unavailable", "code": 9101 })
    );

    let (status, _, body) = gw.get("/api/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "order");
}

#[tokio::test]
async fn test_slow_upstream_times_out_as_unavailable() {
    let slow = spawn_slow_upstream(Duration::from_secs(5)).await;
    let gw = Harness::new(|c| {
        c.reservation_service_url = slow;
        c.upstream_timeout_ms = 300;
    })
    .await;

    let started = Instant::now();
    let (status, _, body) = gw.get("/api/reservation").await;
    let elapsed = started.elapsed();

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({ "error": "Service temporarily unavailable", "code": 9101 })
    );
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");

    let (status, _, body) = gw.get("/api/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "contact");
}

#[tokio::test]
async fn test_oversized_body_is_rejected_before_forwarding() {
    let gw = Harness::new(|c| c.max_body_bytes = 16).await;

    let (status, _, body) = gw
        .send(
            http::Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(vec![b'x'; 64]))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], 9);
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let gw = Harness::new(|_| {}).await;

    let (_, headers, body) = gw.get("/api/reservation").await;
    let id = headers["x-request-id"].to_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(body["headers"]["x-request-id"], id);

    let (_, headers, body) = gw
        .send(
            http::Request::builder()
                .uri("/api/reservation")
                .header("x-request-id", "client-chosen")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(headers["x-request-id"], "client-chosen");
    assert_eq!(body["headers"]["x-request-id"], "client-chosen");
}

async fn explode() -> &'static str {
    panic!("handler bug")
}

#[tokio::test]
async fn test_panic_becomes_generic_500() {
    let gw = Harness::with_extra(|_| {}, Router::new().route("/boom", get(explode))).await;

    let (status, _, body) = gw.get("/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Something went wrong!", "code": 9001 })
    );

    let (status, _, _) = gw.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}
