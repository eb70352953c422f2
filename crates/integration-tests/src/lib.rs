//! End-to-end tests for the confectionery API.
//!
//! The tests in `tests/` talk to a running server over HTTP and are
//! `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations and start the server
//! cargo run -p confectionery-cli -- migrate
//! cargo run -p confectionery-api
//!
//! # Run the ignored tests against it
//! API_BASE_URL=http://localhost:8080 cargo test -p confectionery-integration-tests -- --ignored
//! ```
//!
//! Every test creates its own rows with unique emails and names, so runs
//! can share a database.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the API under test (`API_BASE_URL`, default `http://localhost:8080`).
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Build a URL for `path` on the API under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

/// Create an HTTP client.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A value no other test run will reuse.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// A unique, syntactically valid email.
#[must_use]
pub fn unique_email() -> String {
    format!("{}@example.com", unique("customer"))
}

/// Create a customer and return the response body.
pub async fn create_customer(client: &Client, email: &str) -> Value {
    let resp = client
        .post(url("/customers/"))
        .json(&json!({
            "fName": "Test",
            "lName": "Customer",
            "email": email,
            "password": "Passw0rd!",
            "passwordConfirmation": "Passw0rd!",
        }))
        .send()
        .await
        .expect("Failed to create test customer");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse customer")
}

/// Create a cake with a unique name and return the response body.
pub async fn create_cake(client: &Client, price: u64) -> Value {
    let resp = client
        .post(url("/cakes/"))
        .json(&json!({ "name": unique("cake"), "price": price }))
        .send()
        .await
        .expect("Failed to create test cake");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse cake")
}

/// Read the numeric `id` field of a response body.
#[must_use]
pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("response has no numeric id")
}
