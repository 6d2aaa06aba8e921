//! Storage traits for the catalog and their backends.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  mod.rs    - AuthorStore / BookStore traits   │
//! │  mysql.rs  - MySQL implementation (sqlx)      │
//! │  memory.rs - in-process implementation        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Identifiers arrive as the raw path strings and are parsed here; a value
//! that is not an integer fails with [`CatalogError::InvalidInput`].
//!
//! [`CatalogError::InvalidInput`]: crate::error::CatalogError::InvalidInput

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::modules::authors::models::Author;
use crate::modules::books::models::Book;

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Persistence for authors.
#[async_trait]
pub trait AuthorStore: Send + Sync + 'static {
    /// Inserts the author; a duplicate id is a storage error.
    async fn create(&self, author: Author) -> CatalogResult<Author>;

    /// Overwrites every field but the id of an existing author and returns
    /// the caller's record.
    async fn replace(&self, id: &str, author: Author) -> CatalogResult<Author>;

    /// Deletes the author together with the book sharing its id, returning
    /// how many book rows went with it.
    async fn remove(&self, id: &str) -> CatalogResult<u64>;
}

/// Persistence for books.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Inserts the book row; the embedded author is not persisted.
    async fn create(&self, book: Book) -> CatalogResult<Book>;

    /// Every book with its author attached, in storage scan order.
    async fn list_all(&self) -> CatalogResult<Vec<Book>>;

    async fn get_by_id(&self, id: &str) -> CatalogResult<Book>;

    /// Updates title, publication and published date of an existing book
    /// and returns the caller's record.
    async fn replace(&self, id: &str, book: Book) -> CatalogResult<Book>;

    /// Deletes the book, returning rows affected.
    async fn remove(&self, id: &str) -> CatalogResult<u64>;
}
