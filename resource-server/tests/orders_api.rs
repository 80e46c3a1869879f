mod common;

use common::{TestApp, assert_document_id, json_request};
use http::StatusCode;
use resource_server::Resource;
use serde_json::{Value, json};

fn order_body(item_id: &str) -> Value {
    json!({
        "itemId": item_id,
        "quantity": 2,
        "name": "John Doe",
        "email": "john@x.com",
        "address": "123 St",
        "phone": "555-0100"
    })
}

async fn place(app: &TestApp, body: Value) -> Value {
    let (status, response) = app.send(json_request("POST", "/api/orders", body)).await;
    assert_eq!(status, StatusCode::CREATED, "{response}");
    let (_, orders) = app.get("/api/orders").await;
    orders.as_array().unwrap().last().cloned().unwrap()
}

#[tokio::test]
async fn place_order_returns_confirmation() {
    let app = TestApp::new(Resource::Order).await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/orders",
            order_body("65f1c0ffee0000000000abcd"),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Order placed successfully!" }));

    let (status, orders) = app.get("/api/orders").await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);

    let order = &orders[0];
    assert_document_id(order);
    assert_eq!(order["itemId"], "65f1c0ffee0000000000abcd");
    assert_eq!(order["quantity"], 2);
    assert_eq!(order["name"], "John Doe");
    assert_eq!(order["email"], "john@x.com");
    assert_eq!(order["address"], "123 St");
    assert_eq!(order["phone"], "555-0100");
    let created_at = order["createdAt"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn dangling_item_reference_is_accepted() {
    let app = TestApp::new(Resource::Order).await;
    let order = place(&app, order_body("item-that-was-deleted")).await;
    assert_eq!(order["itemId"], "item-that-was-deleted");
}

#[tokio::test]
async fn list_keeps_insertion_order() {
    let app = TestApp::new(Resource::Order).await;
    for name in ["First", "Second", "Third"] {
        let mut body = order_body("65f1c0ffee0000000000abcd");
        body["name"] = json!(name);
        place(&app, body).await;
    }

    let (_, orders) = app.get("/api/orders").await;
    let names: Vec<_> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn trailing_slash_lists_orders() {
    let app = TestApp::new(Resource::Order).await;
    place(&app, order_body("65f1c0ffee0000000000abcd")).await;

    let (status, orders) = app.get("/api/orders/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_is_partial() {
    let app = TestApp::new(Resource::Order).await;
    let order = place(&app, order_body("65f1c0ffee0000000000abcd")).await;
    let id = order["_id"].as_str().unwrap();

    let (status, updated) = app
        .send(json_request(
            "PUT",
            &format!("/api/orders/{id}"),
            json!({ "quantity": 5 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 5);
    assert_eq!(updated["name"], "John Doe");
    assert_eq!(updated["address"], "123 St");
    assert_eq!(updated["createdAt"], order["createdAt"]);
    assert_eq!(updated["_id"], id);
}

#[tokio::test]
async fn update_missing_order_is_not_found() {
    let app = TestApp::new(Resource::Order).await;

    let (status, body) = app
        .send(json_request(
            "PUT",
            "/api/orders/65f1c0ffee0000000000abcd",
            json!({ "quantity": 1 }),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
    assert_eq!(body["code"], 3);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = TestApp::new(Resource::Order).await;
    let order = place(&app, order_body("65f1c0ffee0000000000abcd")).await;
    let uri = format!("/api/orders/{}", order["_id"].as_str().unwrap());

    for _ in 0..2 {
        let (status, body) = app.delete(&uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Order deleted successfully");
    }
}

#[tokio::test]
async fn invalid_orders_are_rejected() {
    let app = TestApp::new(Resource::Order).await;

    let mut zero = order_body("65f1c0ffee0000000000abcd");
    zero["quantity"] = json!(0);
    let (status, body) = app.send(json_request("POST", "/api/orders", zero)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8);

    let mut missing = order_body("65f1c0ffee0000000000abcd");
    missing.as_object_mut().unwrap().remove("phone");
    let (status, body) = app.send(json_request("POST", "/api/orders", missing)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let mut bad_email = order_body("65f1c0ffee0000000000abcd");
    bad_email["email"] = json!("john-at-x");
    let (status, body) = app.send(json_request("POST", "/api/orders", bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);

    let mut wrong_type = order_body("65f1c0ffee0000000000abcd");
    wrong_type["quantity"] = json!("two");
    let (status, _) = app.send(json_request("POST", "/api/orders", wrong_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, orders) = app.get("/api/orders").await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn store_outage_on_create() {
    let app = TestApp::new(Resource::Order).await;
    app.state.db.pool.close().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/orders",
            order_body("65f1c0ffee0000000000abcd"),
        ))
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Failed to place order");
}

#[tokio::test]
async fn no_single_order_lookup() {
    let app = TestApp::new(Resource::Order).await;
    let (status, _) = app.get("/api/orders/65f1c0ffee0000000000abcd").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
