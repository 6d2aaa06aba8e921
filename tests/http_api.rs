mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{book_json, create_test_app, send, CHETAN};

#[tokio::test]
async fn post_author_echoes_body() {
    let app = create_test_app();

    let response = send(&app, Method::POST, "/author", Some(CHETAN)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body, CHETAN);
}

#[tokio::test]
async fn duplicate_author_is_rejected_with_storage_message() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;

    let response = send(&app, Method::POST, "/author", Some(CHETAN)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Duplicate entry"), "{}", response.body);
    assert_eq!(
        response.content_type.as_deref(),
        Some("text/plain; charset=utf-8")
    );
}

#[tokio::test]
async fn post_author_with_missing_field_is_rejected() {
    let app = create_test_app();

    let response = send(
        &app,
        Method::POST,
        "/author",
        Some(r#"{"authID":2,"firstName":"Ruskin"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "missing fields");
}

#[tokio::test]
async fn malformed_json_reports_decoder_text() {
    let app = create_test_app();

    for uri in ["/author", "/book"] {
        let response = send(&app, Method::POST, uri, Some("{")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(
            response.body.contains("EOF while parsing"),
            "{}: {}",
            uri,
            response.body
        );
    }

    let response = send(&app, Method::PUT, "/book/1", Some(r#"{"bookID":"one"}"#)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("invalid type"), "{}", response.body);
}

#[tokio::test]
async fn null_fields_are_reported_by_validation() {
    let app = create_test_app();

    let response = send(
        &app,
        Method::POST,
        "/author",
        Some(r#"{"authID":2,"firstName":null,"lastName":"Bond","dob":"19/05/1934","penName":"Ruskin"}"#),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "missing fields");

    let response = send(
        &app,
        Method::POST,
        "/book",
        Some(r#"{"bookID":2,"authorID":1,"auth":null,"title":"Two States","publication":"Penguin","publishedDate":"08/10/2009"}"#),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "missing author fields");
}

#[tokio::test]
async fn book_with_future_date_is_rejected() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;

    let response = send(
        &app,
        Method::POST,
        "/book",
        Some(&book_json(1, "16/03/2061")),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "invalid publishedDate");
}

#[tokio::test]
async fn book_round_trip_attaches_stored_author() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;

    let created = send(&app, Method::POST, "/book", Some(&book_json(3, "08/10/2009"))).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let fetched = send(&app, Method::GET, "/book/3", None).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let book = fetched.json();
    assert_eq!(book["bookID"], 3);
    assert_eq!(book["authorID"], 1);
    assert_eq!(book["title"], "Two States");
    assert_eq!(book["publication"], "Penguin");
    assert_eq!(book["publishedDate"], "08/10/2009");
    assert_eq!(book["auth"], serde_json::from_str::<serde_json::Value>(CHETAN).unwrap());
}

#[tokio::test]
async fn book_for_unknown_author_is_rejected() {
    let app = create_test_app();

    let response = send(&app, Method::POST, "/book", Some(&book_json(1, "08/10/2009"))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("foreign key constraint fails"));
}

#[tokio::test]
async fn list_books_is_empty_array_when_catalog_is_empty() {
    let app = create_test_app();

    let response = send(&app, Method::GET, "/books", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn list_books_returns_every_book() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;
    send(&app, Method::POST, "/book", Some(&book_json(2, "08/10/2009"))).await;
    send(&app, Method::POST, "/book", Some(&book_json(1, "16/03/2004"))).await;

    let response = send(&app, Method::GET, "/books", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let books = response.json();
    let ids: Vec<i64> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["bookID"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn delete_author_removes_book_with_same_id() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;
    send(&app, Method::POST, "/book", Some(&book_json(1, "08/10/2009"))).await;

    let deleted = send(&app, Method::DELETE, "/author/1", None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let fetched = send(&app, Method::GET, "/book/1", None).await;
    assert_eq!(fetched.status, StatusCode::BAD_REQUEST);
    assert_eq!(fetched.body, "book with id 1 not found");
}

#[tokio::test]
async fn update_unknown_book_is_not_found() {
    let app = create_test_app();

    let response = send(&app, Method::PUT, "/book/11", Some(&book_json(11, "08/10/2009"))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "book with id 11 not found");
}

#[tokio::test]
async fn update_book_changes_mutable_fields() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;
    send(&app, Method::POST, "/book", Some(&book_json(4, "08/10/2009"))).await;

    let update = book_json(4, "01/01/2010").replace("Two States", "Revolution 2020");
    let response = send(&app, Method::PUT, "/book/4", Some(&update)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["title"], "Revolution 2020");

    let fetched = send(&app, Method::GET, "/book/4", None).await.json();
    assert_eq!(fetched["title"], "Revolution 2020");
    assert_eq!(fetched["publishedDate"], "01/01/2010");
}

#[tokio::test]
async fn update_author_then_read_through_book() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;
    send(&app, Method::POST, "/book", Some(&book_json(5, "08/10/2009"))).await;

    let renamed = CHETAN.replace(r#""penName":"Chetan""#, r#""penName":"CB""#);
    let response = send(&app, Method::PUT, "/author/1", Some(&renamed)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, renamed);

    let book = send(&app, Method::GET, "/book/5", None).await.json();
    assert_eq!(book["auth"]["penName"], "CB");
}

#[tokio::test]
async fn invalid_ids_are_rejected() {
    let app = create_test_app();

    let response = send(&app, Method::DELETE, "/author/0", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "invalid id");

    let response = send(&app, Method::GET, "/book/abc", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.starts_with("invalid input"), "{}", response.body);

    let response = send(&app, Method::DELETE, "/book/-3", None).await;
    assert_eq!(response.body, "invalid id");
}

#[tokio::test]
async fn delete_book_then_delete_again() {
    let app = create_test_app();
    send(&app, Method::POST, "/author", Some(CHETAN)).await;
    send(&app, Method::POST, "/book", Some(&book_json(6, "08/10/2009"))).await;

    let first = send(&app, Method::DELETE, "/book/6", None).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);

    let second = send(&app, Method::DELETE, "/book/6", None).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body, "book with id 6 not found");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = create_test_app();

    let request = axum::http::Request::get("/healthz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn openapi_document_lists_catalog_routes() {
    let app = create_test_app();

    let response = send(&app, Method::GET, "/docs/openapi.json", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let doc = response.json();
    for path in ["/author", "/author/{id}", "/books", "/book", "/book/{id}"] {
        assert!(doc["paths"].get(path).is_some(), "missing {}", path);
    }
}
