use std::sync::Arc;

use async_trait::async_trait;

use super::models::Author;
use crate::error::{CatalogError, CatalogResult};
use crate::store::AuthorStore;
use crate::utils::{ensure_positive, validate_id};

/// Business rules for authors, applied before anything reaches storage.
#[async_trait]
pub trait AuthorService: Send + Sync + 'static {
    async fn post(&self, author: Author) -> CatalogResult<Author>;

    async fn update(&self, id: &str, author: Author) -> CatalogResult<Author>;

    /// Returns the number of book rows removed with the author.
    async fn delete(&self, id: &str) -> CatalogResult<u64>;
}

pub struct DefaultAuthorService {
    store: Arc<dyn AuthorStore>,
}

impl DefaultAuthorService {
    pub fn new(store: Arc<dyn AuthorStore>) -> Self {
        Self { store }
    }
}

fn check_fields(author: &Author) -> CatalogResult<()> {
    if author.has_missing_fields() {
        return Err(CatalogError::MissingFields);
    }
    Ok(())
}

#[async_trait]
impl AuthorService for DefaultAuthorService {
    async fn post(&self, author: Author) -> CatalogResult<Author> {
        ensure_positive(author.id)?;
        check_fields(&author)?;

        self.store.create(author).await
    }

    async fn update(&self, id: &str, author: Author) -> CatalogResult<Author> {
        validate_id(id)?;
        check_fields(&author)?;

        self.store.replace(id, author).await
    }

    async fn delete(&self, id: &str) -> CatalogResult<u64> {
        validate_id(id)?;

        self.store.remove(id).await
    }
}
