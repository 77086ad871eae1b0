//! Integration tests for the ledger: account balances are always the sum
//! of the transaction log (incoming minus outgoing), recomputed inside
//! the same transaction as the change that touched them.

mod common;

use axum::{body, http::Method, response::Response};
use common::TestApp;
use serde_json::{json, Value};

async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

async fn create_account(app: &TestApp, name: &str, account_type: &str) -> String {
    let response = app
        .request(
            Method::POST,
            "/api/v1/accounts",
            Some(json!({
                "name": name,
                "account_type": account_type,
                "currency": "USD"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    body["data"]["id"].as_str().expect("account id").to_string()
}

async fn account_balance(app: &TestApp, id: &str) -> String {
    let response = app
        .request(Method::GET, &format!("/api/v1/accounts/{}", id), None)
        .await;
    let body = response_json(response).await;
    body["data"]["balance"]
        .as_str()
        .expect("balance")
        .to_string()
}

// Moves funds into `account` through an adjustment from a counter-account.
async fn fund(app: &TestApp, from: &str, account: &str, amount: &str) {
    let response = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(json!({
                "transaction_type": "adjustment",
                "amount": amount,
                "source_account_id": from,
                "destination_account_id": account
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
}

// An income row is stored with destination = source, so it appears on
// both sides of the incoming-minus-outgoing sum and leaves the balance
// where it was.
#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn income_rows_are_balance_neutral_for_their_account() {
    let app = TestApp::new().await;
    let cash = create_account(&app, "Cash", "cash").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(json!({
                "transaction_type": "income",
                "amount": "100.00",
                "source_account_id": cash
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["destination_account_id"], body["data"]["source_account_id"]);
    assert_eq!(account_balance(&app, &cash).await, "0.00");

    let response = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(json!({
                "transaction_type": "expense",
                "amount": "30.00",
                "source_account_id": cash
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(account_balance(&app, &cash).await, "-30.00");
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn transfer_moves_funds_and_requires_a_distinct_destination() {
    let app = TestApp::new().await;
    let equity = create_account(&app, "Opening balances", "other").await;
    let cash = create_account(&app, "Cash", "cash").await;
    let bank = create_account(&app, "Bank", "bank").await;

    fund(&app, &equity, &cash, "200.00").await;
    assert_eq!(account_balance(&app, &cash).await, "200.00");

    let response = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(json!({
                "transaction_type": "transfer",
                "amount": "50.00",
                "source_account_id": cash,
                "destination_account_id": cash
            })),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(json!({
                "transaction_type": "transfer",
                "amount": "50.00",
                "source_account_id": cash,
                "destination_account_id": bank
            })),
        )
        .await;
    assert_eq!(response.status(), 200);

    assert_eq!(account_balance(&app, &cash).await, "150.00");
    assert_eq!(account_balance(&app, &bank).await, "50.00");
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn deleting_a_transaction_recomputes_the_balance() {
    let app = TestApp::new().await;
    let equity = create_account(&app, "Opening balances", "other").await;
    let cash = create_account(&app, "Cash", "cash").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(json!({
                "transaction_type": "adjustment",
                "amount": "80.00",
                "source_account_id": equity,
                "destination_account_id": cash
            })),
        )
        .await;
    let body = response_json(response).await;
    let tx_id = body["data"]["id"].as_str().expect("transaction id");

    assert_eq!(account_balance(&app, &cash).await, "80.00");

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/transactions/{}", tx_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(account_balance(&app, &cash).await, "0");
}

#[tokio::test]
#[ignore = "requires a SQLite integration environment"]
async fn zero_amount_transactions_are_rejected() {
    let app = TestApp::new().await;
    let cash = create_account(&app, "Cash", "cash").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(json!({
                "transaction_type": "income",
                "amount": "0.00",
                "source_account_id": cash
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
}
