//! HTTP handlers for the books module.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use libris_http::{ApiError, JsonBody};

use super::models::Book;
use super::service::BookService;

pub type SharedBookService = Arc<dyn BookService>;

pub fn router(service: SharedBookService) -> Router {
    Router::new()
        .route("/books", get(list_books))
        .route("/book", post(create_book))
        .route(
            "/book/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(service)
}

/// List every book with its author
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = [Book]),
        (status = 400, description = "Storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn list_books(
    State(service): State<SharedBookService>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = service.list_all().await?;

    tracing::info!(count = books.len(), "books listed");
    Ok(Json(books))
}

/// Fetch one book with its author
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Invalid id, unknown book or storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn get_book(
    State(service): State<SharedBookService>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book = service.get_by_id(&id).await?;

    tracing::info!(book_id = book.id, "book fetched");
    Ok(Json(book))
}

/// Create a book for an existing author
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Validation or storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn create_book(
    State(service): State<SharedBookService>,
    JsonBody(book): JsonBody<Book>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = service.post(book).await?;

    tracing::info!(book_id = book.id, author_id = book.author_id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace a book's title, publication and published date
#[utoipa::path(
    put,
    path = "/book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Validation failure, unknown book or storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn update_book(
    State(service): State<SharedBookService>,
    Path(id): Path<String>,
    JsonBody(book): JsonBody<Book>,
) -> Result<Json<Book>, ApiError> {
    let book = service.update(&id, book).await?;

    tracing::info!(book_id = %id, "book updated");
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid id, unknown book or storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_book(
    State(service): State<SharedBookService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&id).await?;

    tracing::info!(book_id = %id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
