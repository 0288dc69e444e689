//! End-to-end tests against a running API.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The API server running (cargo run -p clientele-api)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` matching the server's configuration
//!
//! Run with: cargo test -p clientele-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use clientele_integration_tests::{admin_password, admin_username, api_base_url};

/// Log in and return a bearer token.
async fn bearer_token(client: &Client) -> String {
    let base_url = api_base_url();
    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({
            "username": admin_username(),
            "password": admin_password(),
        }))
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read login response");
    body["data"]["token"]
        .as_str()
        .expect("token present")
        .to_string()
}

/// A unique email per test run so repeated runs don't collide.
fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_health_endpoint() {
    let client = Client::new();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/api/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["success"], json!(true));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_customers_require_authentication() {
    let client = Client::new();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/api/customers"))
        .send()
        .await
        .expect("Failed to reach customers endpoint");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_customer_lifecycle() {
    let client = Client::new();
    let base_url = api_base_url();
    let token = bearer_token(&client).await;
    let email = unique_email("lifecycle");

    // Create
    let resp = client
        .post(format!("{base_url}/api/customers"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "João Silva",
            "email": email,
            "phone": "(11) 98765-4321",
            "address": "Rua Exemplo, 123 - São Paulo",
        }))
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("Failed to read create response");
    let id = created["data"]["id"].as_str().expect("id").to_string();

    // Read back
    let resp = client
        .get(format!("{base_url}/api/customers/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch customer");
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.expect("Failed to read fetch response");
    assert_eq!(fetched["data"], created["data"]);

    // Partial update
    let resp = client
        .put(format!("{base_url}/api/customers/{id}"))
        .bearer_auth(&token)
        .json(&json!({"phone": "(21) 99876-5432"}))
        .send()
        .await
        .expect("Failed to update customer");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to read update response");
    assert_eq!(updated["data"]["phone"], json!("(21) 99876-5432"));
    assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);
    assert_ne!(updated["data"]["updatedAt"], created["data"]["updatedAt"]);

    // Delete
    let resp = client
        .delete(format!("{base_url}/api/customers/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete customer");
    assert_eq!(resp.status(), StatusCode::OK);

    // Gone
    let resp = client
        .get(format!("{base_url}/api/customers/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch deleted customer");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_email_conflict() {
    let client = Client::new();
    let base_url = api_base_url();
    let token = bearer_token(&client).await;
    let email = unique_email("conflict");

    let body = json!({
        "name": "Maria Santos",
        "email": email,
        "phone": "(21) 99876-5432",
        "address": "Av. Principal, 456",
    });

    let resp = client
        .post(format!("{base_url}/api/customers"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("Failed to read create response");

    let resp = client
        .post(format!("{base_url}/api/customers"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send duplicate create");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Cleanup
    let id = created["data"]["id"].as_str().expect("id");
    let _ = client
        .delete(format!("{base_url}/api/customers/{id}"))
        .bearer_auth(&token)
        .send()
        .await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_listing_pagination_shape() {
    let client = Client::new();
    let base_url = api_base_url();
    let token = bearer_token(&client).await;

    let resp = client
        .get(format!("{base_url}/api/customers?page=1&limit=5"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list customers");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to read list response");
    assert_eq!(body["success"], json!(true));
    assert!(body["data"]["data"].is_array());
    assert!(body["data"]["total"].is_number());
    assert_eq!(body["data"]["page"], json!(1));
    assert!(body["data"]["totalPages"].is_number());
}
