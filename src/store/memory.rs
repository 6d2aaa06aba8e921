//! In-memory storage implementation.
//!
//! Mirrors the observable behavior of the MySQL backend: caller-chosen
//! primary keys, the `Book.authorId` foreign key, the author cascade keyed on
//! book id, and the server's error messages. Rows iterate in primary-key
//! order, which is what an InnoDB table scan yields.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use super::{AuthorStore, BookStore};
use crate::error::{CatalogError, CatalogResult};
use crate::modules::authors::models::Author;
use crate::modules::books::models::Book;
use crate::utils::parse_id;

/// A `Book` row as persisted: no embedded author.
#[derive(Debug, Clone)]
struct BookRow {
    id: i64,
    author_id: i64,
    title: String,
    publication: String,
    published_date: String,
}

impl BookRow {
    fn from_book(book: &Book) -> Self {
        Self {
            id: book.id,
            author_id: book.author_id,
            title: book.title.clone(),
            publication: book.publication.clone(),
            published_date: book.published_date.clone(),
        }
    }

    fn to_book(&self, author: Author) -> Book {
        Book {
            id: self.id,
            author_id: self.author_id,
            author,
            title: self.title.clone(),
            publication: self.publication.clone(),
            published_date: self.published_date.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    authors: BTreeMap<i64, Author>,
    books: BTreeMap<i64, BookRow>,
}

/// In-memory implementation of [`AuthorStore`] and [`BookStore`].
///
/// Both tables sit behind one lock, so every operation, the cascade delete
/// included, is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store wrapped in Arc.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn duplicate_entry(id: i64, table: &str) -> CatalogError {
    CatalogError::storage(format!(
        "Duplicate entry '{}' for key '{}.PRIMARY'",
        id, table
    ))
}

fn child_row_violation() -> CatalogError {
    CatalogError::storage(
        "Cannot add or update a child row: a foreign key constraint fails \
         (`Book`, CONSTRAINT `fk_book_author` FOREIGN KEY (`authorId`) REFERENCES `Author` (`authorId`))",
    )
}

fn parent_row_violation() -> CatalogError {
    CatalogError::storage(
        "Cannot delete or update a parent row: a foreign key constraint fails \
         (`Book`, CONSTRAINT `fk_book_author` FOREIGN KEY (`authorId`) REFERENCES `Author` (`authorId`))",
    )
}

#[async_trait]
impl AuthorStore for MemoryStore {
    #[instrument(skip(self, author), fields(author_id = author.id))]
    async fn create(&self, author: Author) -> CatalogResult<Author> {
        let mut tables = self.tables.write().await;

        if tables.authors.contains_key(&author.id) {
            return Err(duplicate_entry(author.id, "Author"));
        }
        tables.authors.insert(author.id, author.clone());

        Ok(author)
    }

    #[instrument(skip(self, author))]
    async fn replace(&self, id: &str, author: Author) -> CatalogResult<Author> {
        let id = parse_id(id)?;
        let mut tables = self.tables.write().await;

        let stored = tables
            .authors
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found("author", id))?;

        *stored = Author {
            id,
            ..author.clone()
        };

        Ok(author)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> CatalogResult<u64> {
        let id = parse_id(id)?;
        let mut tables = self.tables.write().await;

        if !tables.authors.contains_key(&id) {
            return Err(CatalogError::not_found("author", id));
        }

        // The book sharing the author's id goes, whoever wrote it.
        let still_referenced = tables
            .books
            .values()
            .any(|book| book.author_id == id && book.id != id);
        if still_referenced {
            // The transaction rolls back: nothing is removed.
            return Err(parent_row_violation());
        }

        let books = u64::from(tables.books.remove(&id).is_some());
        tables.authors.remove(&id);

        tracing::debug!(author_id = id, books, "author removed");
        Ok(books)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    #[instrument(skip(self, book), fields(book_id = book.id, author_id = book.author_id))]
    async fn create(&self, book: Book) -> CatalogResult<Book> {
        let mut tables = self.tables.write().await;

        if tables.books.contains_key(&book.id) {
            return Err(duplicate_entry(book.id, "Book"));
        }
        if !tables.authors.contains_key(&book.author_id) {
            return Err(child_row_violation());
        }
        tables.books.insert(book.id, BookRow::from_book(&book));

        Ok(book)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> CatalogResult<Vec<Book>> {
        let tables = self.tables.read().await;

        tables
            .books
            .values()
            .map(|row| {
                let author = tables.authors.get(&row.author_id).cloned().ok_or_else(|| {
                    CatalogError::storage(format!(
                        "book {} references missing author {}",
                        row.id, row.author_id
                    ))
                })?;
                Ok(row.to_book(author))
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> CatalogResult<Book> {
        let id = parse_id(id)?;
        let tables = self.tables.read().await;

        let row = tables
            .books
            .get(&id)
            .ok_or_else(|| CatalogError::not_found("book", id))?;
        let author = tables
            .authors
            .get(&row.author_id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("author", row.author_id))?;

        Ok(row.to_book(author))
    }

    #[instrument(skip(self, book))]
    async fn replace(&self, id: &str, book: Book) -> CatalogResult<Book> {
        let id = parse_id(id)?;
        let mut tables = self.tables.write().await;

        let row = tables
            .books
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found("book", id))?;

        row.title = book.title.clone();
        row.publication = book.publication.clone();
        row.published_date = book.published_date.clone();

        Ok(book)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> CatalogResult<u64> {
        let id = parse_id(id)?;
        let mut tables = self.tables.write().await;

        match tables.books.remove(&id) {
            Some(_) => Ok(1),
            None => Err(CatalogError::not_found("book", id)),
        }
    }
}
