//! Cake endpoint tests.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (cargo run -p confectionery-cli -- migrate)
//! - The API server running (cargo run -p confectionery-api)

use confectionery_integration_tests::{client, create_cake, id_of, url};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_duplicate_cake_name_is_bad_request() {
    let client = client();
    let cake = create_cake(&client, 1_500).await;

    let resp = client
        .post(url("/cakes/"))
        .json(&json!({ "name": cake["name"], "price": 2_000 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["detail"], json!(["Cake already exists"]));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_price_patch_keeps_name() {
    let client = client();
    let cake = create_cake(&client, 1_500).await;
    let id = id_of(&cake);

    let resp = client
        .patch(url(&format!("/cakes/{id}")))
        .json(&json!({ "price": 1_750 }))
        .send()
        .await
        .expect("Failed to patch cake");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse cake");
    assert_eq!(body["name"], cake["name"]);
    assert_eq!(body["price"], 1_750);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_non_numeric_id_is_bad_request() {
    let resp = client()
        .get(url("/cakes/abc"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_delete_cake() {
    let client = client();
    let id = id_of(&create_cake(&client, 900).await);

    let resp = client
        .delete(url(&format!("/cakes/{id}")))
        .send()
        .await
        .expect("Failed to delete cake");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(url(&format!("/cakes/{id}")))
        .send()
        .await
        .expect("Failed to get cake");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
