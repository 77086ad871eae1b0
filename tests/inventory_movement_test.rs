//! Integration tests for stock movements over per-warehouse stock records.
//!
//! Issue, transfer, and reservation must never drive a stock record
//! negative or undercut reservations; those requests fail loudly and
//! leave the record untouched.

mod common;

use axum::{body, http::Method, response::Response};
use common::TestApp;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

async fn record_movement(app: &TestApp, payload: Value) -> Response {
    app.request(Method::POST, "/api/v1/movements", Some(payload))
        .await
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn receipt_creates_the_stock_record() {
    let app = TestApp::new().await;
    let product = app.seed_product("Bolt", dec!(1.50)).await;
    let warehouse = app.seed_warehouse("Main").await;

    let response = record_movement(
        &app,
        json!({
            "movement_type": "receipt",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 100,
            "unit_cost": "0.90"
        }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = app.request(Method::GET, "/api/v1/stock", None).await;
    let body = response_json(response).await;
    let stock = &body["data"][0];
    assert_eq!(stock["quantity"], 100);
    assert_eq!(stock["reserved_quantity"], 0);
    assert_eq!(stock["unit_cost"], "0.90");
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn issue_beyond_available_fails_and_changes_nothing() {
    let app = TestApp::new().await;
    let product = app.seed_product("Nut", dec!(0.50)).await;
    let warehouse = app.seed_warehouse("Main").await;

    let response = record_movement(
        &app,
        json!({
            "movement_type": "receipt",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 10
        }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = record_movement(
        &app,
        json!({
            "movement_type": "issue",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 11
        }),
    )
    .await;
    assert_eq!(response.status(), 422);

    let response = app.request(Method::GET, "/api/v1/stock", None).await;
    let body = response_json(response).await;
    assert_eq!(body["data"][0]["quantity"], 10);

    // The failed movement left no journal row
    let response = app.request(Method::GET, "/api/v1/movements", None).await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["items"].as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn reservation_blocks_issue_of_reserved_units() {
    let app = TestApp::new().await;
    let product = app.seed_product("Gear", dec!(4.00)).await;
    let warehouse = app.seed_warehouse("Main").await;

    record_movement(
        &app,
        json!({
            "movement_type": "receipt",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 5
        }),
    )
    .await;

    let response = record_movement(
        &app,
        json!({
            "movement_type": "reservation",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 3
        }),
    )
    .await;
    assert_eq!(response.status(), 200);

    // Only 2 units remain available
    let response = record_movement(
        &app,
        json!({
            "movement_type": "issue",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 3
        }),
    )
    .await;
    assert_eq!(response.status(), 422);

    // Releasing more than reserved is its own failure
    let response = record_movement(
        &app,
        json!({
            "movement_type": "release",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn transfer_moves_stock_between_warehouses() {
    let app = TestApp::new().await;
    let product = app.seed_product("Plate", dec!(9.00)).await;
    let source = app.seed_warehouse("Source").await;
    let destination = app.seed_warehouse("Destination").await;

    record_movement(
        &app,
        json!({
            "movement_type": "receipt",
            "product_id": product.id.to_string(),
            "warehouse_id": source.id.to_string(),
            "quantity": 8,
            "unit_cost": "7.00"
        }),
    )
    .await;

    // Transfer to the same warehouse is rejected up front
    let response = record_movement(
        &app,
        json!({
            "movement_type": "transfer",
            "product_id": product.id.to_string(),
            "warehouse_id": source.id.to_string(),
            "destination_warehouse_id": source.id.to_string(),
            "quantity": 3
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    let response = record_movement(
        &app,
        json!({
            "movement_type": "transfer",
            "product_id": product.id.to_string(),
            "warehouse_id": source.id.to_string(),
            "destination_warehouse_id": destination.id.to_string(),
            "quantity": 3
        }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/stock?warehouse_id={}", destination.id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"][0]["quantity"], 3);
    // Destination record carries the source's unit cost
    assert_eq!(body["data"][0]["unit_cost"], "7.00");
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn adjustment_cannot_undercut_reservations() {
    let app = TestApp::new().await;
    let product = app.seed_product("Axle", dec!(12.00)).await;
    let warehouse = app.seed_warehouse("Main").await;

    record_movement(
        &app,
        json!({
            "movement_type": "receipt",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 10
        }),
    )
    .await;
    record_movement(
        &app,
        json!({
            "movement_type": "reservation",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 4
        }),
    )
    .await;

    let response = record_movement(
        &app,
        json!({
            "movement_type": "adjustment",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 3
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    let response = record_movement(
        &app,
        json!({
            "movement_type": "adjustment",
            "product_id": product.id.to_string(),
            "warehouse_id": warehouse.id.to_string(),
            "quantity": 6
        }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = app.request(Method::GET, "/api/v1/stock", None).await;
    let body = response_json(response).await;
    assert_eq!(body["data"][0]["quantity"], 6);
    assert_eq!(body["data"][0]["reserved_quantity"], 4);
}
