//! Shared helpers for HTTP-level tests.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use libris_app::app::build_registry;
use libris_app::store::MemoryStore;
use libris_kernel::settings::ServerSettings;
use serde_json::Value;
use tower::ServiceExt;

/// Full application router over a fresh in-memory store.
pub fn create_test_app() -> Router {
    let registry = build_registry(MemoryStore::new_shared());
    libris_http::build_router(&registry, &ServerSettings::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub const CHETAN: &str =
    r#"{"authID":1,"firstName":"Chetan","lastName":"Bhagat","dob":"06/04/2001","penName":"Chetan"}"#;

/// A valid book payload for author 1.
pub fn book_json(book_id: i64, published_date: &str) -> String {
    format!(
        r#"{{"bookID":{book_id},"authorID":1,"auth":{CHETAN},"title":"Two States","publication":"Penguin","publishedDate":"{published_date}"}}"#
    )
}
