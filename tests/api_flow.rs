//! End-to-end tests against the gateway router with the in-process store.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use tradepost::gateway::{self, state::AppState};
use tradepost::order::OrderService;
use tradepost::product::ProductService;
use tradepost::store::{MemoryStore, RecordStore};

fn app() -> Router {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    let products = Arc::new(ProductService::new(store.clone(), "Products"));
    let orders = Arc::new(OrderService::new(store, "Orders", products.clone()));
    gateway::router(AppState::new(products, orders))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn req(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, req("GET", "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn product_then_order_scenario() {
    let app = app();

    let (status, product) = send(
        &app,
        req(
            "POST",
            "/api/products",
            Some("s1"),
            Some(json!({"name": "Widget", "price": 9.99, "sellerId": "s1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["price"], json!(9.99));
    assert_eq!(product["sellerId"], json!("s1"));
    let product_id = product["id"].as_str().unwrap().to_string();

    let (status, order) = send(
        &app,
        req(
            "POST",
            "/api/orders",
            Some("b1"),
            Some(json!({
                "productId": product_id,
                "buyerId": "b1",
                "quantity": 3,
                "shippingAddress": "x",
                "status": "Delivered"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["totalPrice"], json!(29.97));
    assert_eq!(order["status"], json!("Pending"));
    assert_eq!(order["sellerId"], json!("s1"));
    assert_eq!(order["productName"], json!("Widget"));
}

#[tokio::test]
async fn get_unknown_product_is_404() {
    let app = app();
    let (status, body) = send(&app, req("GET", "/api/products/nonexistent", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Failed to fetch product"));
}

#[tokio::test]
async fn create_product_with_missing_fields_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        req("POST", "/api/products", Some("s1"), Some(json!({"price": 10}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("name, price, and sellerId are required"));
}

#[tokio::test]
async fn mutations_without_identity_are_401() {
    let app = app();
    let (status, _) = send(
        &app,
        req(
            "POST",
            "/api/products",
            None,
            Some(json!({"name": "Widget", "price": 1, "sellerId": "s1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_by_non_owner_is_403_and_seller_id_is_immutable() {
    let app = app();
    let (_, product) = send(
        &app,
        req(
            "POST",
            "/api/products",
            Some("s1"),
            Some(json!({"name": "Widget", "price": 9.99, "sellerId": "s1"})),
        ),
    )
    .await;
    let id = product["id"].as_str().unwrap();
    let uri = format!("/api/products/{id}");

    let (status, _) = send(
        &app,
        req("PUT", &uri, Some("intruder"), Some(json!({"name": "Hijacked"}))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A sellerId in the patch body is dropped on the floor.
    let (status, updated) = send(
        &app,
        req(
            "PUT",
            &uri,
            Some("s1"),
            Some(json!({"name": "Widget v2", "sellerId": "intruder"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], json!("Widget v2"));
    assert_eq!(updated["sellerId"], json!("s1"));
}

#[tokio::test]
async fn order_snapshot_survives_product_deletion() {
    let app = app();
    let (_, product) = send(
        &app,
        req(
            "POST",
            "/api/products",
            Some("s1"),
            Some(json!({"name": "Widget", "price": 9.99, "sellerId": "s1"})),
        ),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    let (_, order) = send(
        &app,
        req(
            "POST",
            "/api/orders",
            Some("b1"),
            Some(json!({"productId": product_id, "buyerId": "b1", "quantity": 3})),
        ),
    )
    .await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        req("DELETE", &format!("/api/products/{product_id}"), Some("s1"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) =
        send(&app, req("GET", &format!("/api/orders/{order_id}"), None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["productName"], json!("Widget"));
    assert_eq!(fetched["totalPrice"], json!(29.97));
}

#[tokio::test]
async fn order_status_lifecycle_over_http() {
    let app = app();
    let (_, product) = send(
        &app,
        req(
            "POST",
            "/api/products",
            Some("s1"),
            Some(json!({"name": "Widget", "price": 5, "sellerId": "s1"})),
        ),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    let (_, order) = send(
        &app,
        req(
            "POST",
            "/api/orders",
            Some("b1"),
            Some(json!({"productId": product_id, "buyerId": "b1", "quantity": 1})),
        ),
    )
    .await;
    let uri = format!("/api/orders/{}/status", order["id"].as_str().unwrap());

    // Missing status -> 400.
    let (status, _) = send(&app, req("PUT", &uri, Some("s1"), Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unrecognized status -> 400.
    let (status, _) = send(
        &app,
        req("PUT", &uri, Some("s1"), Some(json!({"status": "Lost"}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Buyer cannot ship -> 403.
    let (status, _) = send(
        &app,
        req("PUT", &uri, Some("b1"), Some(json!({"status": "Shipped"}))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Seller ships, then delivers.
    let (status, shipped) = send(
        &app,
        req("PUT", &uri, Some("s1"), Some(json!({"status": "Shipped"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shipped["status"], json!("Shipped"));

    // Delivered -> Pending is illegal; so is cancelling a shipped order.
    let (status, _) = send(
        &app,
        req("PUT", &uri, Some("b1"), Some(json!({"status": "Cancelled"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, delivered) = send(
        &app,
        req("PUT", &uri, Some("s1"), Some(json!({"status": "Delivered"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(delivered["status"], json!("Delivered"));

    let (status, _) = send(
        &app,
        req("PUT", &uri, Some("s1"), Some(json!({"status": "Pending"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_orders_filters_by_participant() {
    let app = app();
    let (_, product) = send(
        &app,
        req(
            "POST",
            "/api/products",
            Some("s1"),
            Some(json!({"name": "Widget", "price": 2, "sellerId": "s1"})),
        ),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    for buyer in ["b1", "b2"] {
        let (status, _) = send(
            &app,
            req(
                "POST",
                "/api/orders",
                Some(buyer),
                Some(json!({"productId": product_id, "buyerId": buyer, "quantity": 1})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = send(&app, req("GET", "/api/orders", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, b1_orders) = send(&app, req("GET", "/api/orders?userId=b1", None, None)).await;
    assert_eq!(b1_orders.as_array().unwrap().len(), 1);
    assert_eq!(b1_orders[0]["buyerId"], json!("b1"));

    // Seller sees both orders, once each.
    let (_, s1_orders) = send(&app, req("GET", "/api/orders?userId=s1", None, None)).await;
    assert_eq!(s1_orders.as_array().unwrap().len(), 2);

    let (_, nobody) = send(&app, req("GET", "/api/orders?userId=zz", None, None)).await;
    assert_eq!(nobody.as_array().unwrap().len(), 0);
}
