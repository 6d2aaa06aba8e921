//! HTTP handlers for the authors module.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use libris_http::{ApiError, JsonBody};

use super::models::Author;
use super::service::AuthorService;

pub type SharedAuthorService = Arc<dyn AuthorService>;

pub fn router(service: SharedAuthorService) -> Router {
    Router::new()
        .route("/author", post(create_author))
        .route("/author/{id}", put(update_author).delete(delete_author))
        .with_state(service)
}

/// Create an author
#[utoipa::path(
    post,
    path = "/author",
    tag = "authors",
    request_body = Author,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Validation or storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn create_author(
    State(service): State<SharedAuthorService>,
    JsonBody(author): JsonBody<Author>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    let author = service.post(author).await?;

    tracing::info!(author_id = author.id, "author created");
    Ok((StatusCode::CREATED, Json(author)))
}

/// Replace an author's fields
#[utoipa::path(
    put,
    path = "/author/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author id")),
    request_body = Author,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Validation failure, unknown author or storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn update_author(
    State(service): State<SharedAuthorService>,
    Path(id): Path<String>,
    JsonBody(author): JsonBody<Author>,
) -> Result<Json<Author>, ApiError> {
    let author = service.update(&id, author).await?;

    tracing::info!(author_id = %id, "author updated");
    Ok(Json(author))
}

/// Delete an author and the book sharing its id
#[utoipa::path(
    delete,
    path = "/author/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author id")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 400, description = "Validation failure, unknown author or storage failure", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_author(
    State(service): State<SharedAuthorService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let books = service.delete(&id).await?;

    tracing::info!(author_id = %id, books, "author deleted");
    Ok(StatusCode::NO_CONTENT)
}
