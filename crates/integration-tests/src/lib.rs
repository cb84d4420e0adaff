//! Integration tests for Mini Shop.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the API
//! cargo run -p mini-shop-cli -- migrate
//! cargo run -p mini-shop-api
//!
//! # Run integration tests against it
//! SHOP_BASE_URL=http://localhost:8080 cargo test -p mini-shop-integration-tests -- --ignored
//! ```
//!
//! Tests share one database, so every fixture carries a unique marker and
//! filters on it to see only its own rows.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// A string unique to one test run, e.g. `AAA-3f2c...`.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Read a response header as a string.
#[must_use]
pub fn header(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

/// HTTP client bound to the API base URL.
pub struct TestClient {
    client: Client,
    base_url: String,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Create a client for [`base_url`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: base_url(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(request: RequestBuilder) -> Response {
        request.send().await.expect("Failed to send request")
    }

    pub async fn get(&self, path: &str) -> Response {
        Self::send(self.client.get(self.url(path))).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        Self::send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        Self::send(self.client.put(self.url(path)).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Response {
        Self::send(self.client.delete(self.url(path))).await
    }

    /// POST `body` and return the created entity, asserting 201.
    pub async fn create(&self, path: &str, body: &Value) -> Value {
        let response = self.post(path, body).await;
        assert_eq!(response.status(), StatusCode::CREATED, "POST {path}");
        response.json().await.expect("Failed to parse created entity")
    }

    /// GET a listing and return its `X-Total-Count`, asserting 200.
    pub async fn total(&self, path: &str) -> u64 {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        header(&response, "x-total-count")
            .and_then(|count| count.parse().ok())
            .expect("Missing or invalid X-Total-Count")
    }

    /// GET a listing and return the ids it contains, asserting 200.
    pub async fn ids(&self, path: &str) -> Vec<i64> {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        let body: Value = response.json().await.expect("Failed to parse listing");
        body.as_array()
            .expect("Listing is not an array")
            .iter()
            .filter_map(|entity| entity["id"].as_i64())
            .collect()
    }
}

/// Extract the `id` of an entity body.
#[must_use]
pub fn id_of(entity: &Value) -> i64 {
    entity["id"].as_i64().expect("Entity has no numeric id")
}
