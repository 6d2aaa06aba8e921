use std::sync::Arc;

use async_trait::async_trait;

use super::models::{is_valid_published_date, Book, Publication};
use crate::error::{CatalogError, CatalogResult};
use crate::store::BookStore;
use crate::utils::{ensure_positive, validate_id};

/// Business rules for books, applied before anything reaches storage.
#[async_trait]
pub trait BookService: Send + Sync + 'static {
    async fn post(&self, book: Book) -> CatalogResult<Book>;

    async fn get_by_id(&self, id: &str) -> CatalogResult<Book>;

    async fn update(&self, id: &str, book: Book) -> CatalogResult<Book>;

    async fn delete(&self, id: &str) -> CatalogResult<u64>;

    /// Every book; empty when the catalog has none.
    async fn list_all(&self) -> CatalogResult<Vec<Book>>;
}

pub struct DefaultBookService {
    store: Arc<dyn BookStore>,
}

impl DefaultBookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }
}

fn check_book_fields(book: &Book) -> CatalogResult<()> {
    if book.has_missing_fields() {
        return Err(CatalogError::MissingBookFields);
    }
    Ok(())
}

fn check_author_fields(book: &Book) -> CatalogResult<()> {
    if book.author.has_missing_fields() {
        return Err(CatalogError::MissingAuthorFields);
    }
    Ok(())
}

/// Date first, then publisher.
fn check_catalog_values(book: &Book) -> CatalogResult<()> {
    if !is_valid_published_date(&book.published_date) {
        return Err(CatalogError::InvalidPublishedDate);
    }
    book.publication.parse::<Publication>()?;
    Ok(())
}

#[async_trait]
impl BookService for DefaultBookService {
    async fn post(&self, book: Book) -> CatalogResult<Book> {
        ensure_positive(book.id)?;
        check_book_fields(&book)?;
        check_author_fields(&book)?;
        check_catalog_values(&book)?;

        self.store.create(book).await
    }

    async fn get_by_id(&self, id: &str) -> CatalogResult<Book> {
        validate_id(id)?;

        self.store.get_by_id(id).await
    }

    async fn update(&self, id: &str, book: Book) -> CatalogResult<Book> {
        // The body is checked before the id is parsed.
        if id.is_empty() {
            return Err(CatalogError::MissingId);
        }
        check_author_fields(&book)?;
        check_book_fields(&book)?;
        check_catalog_values(&book)?;
        validate_id(id)?;

        self.store.replace(id, book).await
    }

    async fn delete(&self, id: &str) -> CatalogResult<u64> {
        validate_id(id)?;

        self.store.remove(id).await
    }

    async fn list_all(&self) -> CatalogResult<Vec<Book>> {
        self.store.list_all().await
    }
}
