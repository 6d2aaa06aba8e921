//! MySQL storage implementation.
//!
//! One parameterized statement per operation against the `Author` and `Book`
//! tables. The only multi-statement sequence, the author cascade delete,
//! runs in a transaction.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Executor, MySql, Row};
use tracing::instrument;

use super::{AuthorStore, BookStore};
use crate::error::{CatalogError, CatalogResult};
use crate::modules::authors::models::Author;
use crate::modules::books::models::Book;
use crate::utils::parse_id;

const SELECT_AUTHOR: &str = r#"
    SELECT authorId, firstName, lastName, dob, penName
    FROM Author
    WHERE authorId = ?
"#;

const SELECT_BOOK: &str = r#"
    SELECT bookId, title, authorId, Publication, PublishedDate
    FROM Book
    WHERE bookId = ?
"#;

/// MySQL implementation of [`AuthorStore`] and [`BookStore`].
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists<'e, E>(executor: E, table: &str, key: &str, id: i64) -> CatalogResult<bool>
    where
        E: Executor<'e, Database = MySql>,
    {
        let query = format!("SELECT 1 FROM {table} WHERE {key} = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.is_some())
    }

    async fn fetch_author(&self, id: i64) -> CatalogResult<Option<Author>> {
        let row = sqlx::query(SELECT_AUTHOR)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(author_from_row).transpose()?)
    }
}

fn author_from_row(row: &MySqlRow) -> Result<Author, sqlx::Error> {
    Ok(Author {
        id: row.try_get("authorId")?,
        first_name: row.try_get("firstName")?,
        last_name: row.try_get("lastName")?,
        dob: row.try_get("dob")?,
        pen_name: row.try_get("penName")?,
    })
}

/// Book columns only; the embedded author is attached separately.
fn book_from_row(row: &MySqlRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        id: row.try_get("bookId")?,
        author_id: row.try_get("authorId")?,
        title: row.try_get("title")?,
        publication: row.try_get("Publication")?,
        published_date: row.try_get("PublishedDate")?,
        ..Default::default()
    })
}

#[async_trait]
impl AuthorStore for MySqlStore {
    #[instrument(skip(self, author), fields(author_id = author.id))]
    async fn create(&self, author: Author) -> CatalogResult<Author> {
        sqlx::query(
            r#"
            INSERT INTO Author (authorId, firstName, lastName, dob, penName)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.dob)
        .bind(&author.pen_name)
        .execute(&self.pool)
        .await?;

        Ok(author)
    }

    #[instrument(skip(self, author))]
    async fn replace(&self, id: &str, author: Author) -> CatalogResult<Author> {
        let id = parse_id(id)?;

        if !Self::exists(&self.pool, "Author", "authorId", id).await? {
            return Err(CatalogError::not_found("author", id));
        }

        sqlx::query(
            r#"
            UPDATE Author
            SET firstName = ?, lastName = ?, dob = ?, penName = ?
            WHERE authorId = ?
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.dob)
        .bind(&author.pen_name)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(author)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> CatalogResult<u64> {
        let id = parse_id(id)?;

        let mut tx = self.pool.begin().await?;

        if !Self::exists(&mut *tx, "Author", "authorId", id).await? {
            tx.rollback().await.ok();
            return Err(CatalogError::not_found("author", id));
        }

        // Matches on bookId, not authorId: the book sharing the author's id
        // is the one removed. Books of this author under other ids are left
        // in place and make the author delete fail on the foreign key.
        let books = sqlx::query("DELETE FROM Book WHERE bookId = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM Author WHERE authorId = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(author_id = id, books, "author removed");
        Ok(books)
    }
}

#[async_trait]
impl BookStore for MySqlStore {
    #[instrument(skip(self, book), fields(book_id = book.id, author_id = book.author_id))]
    async fn create(&self, book: Book) -> CatalogResult<Book> {
        sqlx::query(
            r#"
            INSERT INTO Book (bookId, title, authorId, Publication, PublishedDate)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.publication)
        .bind(&book.published_date)
        .execute(&self.pool)
        .await?;

        Ok(book)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> CatalogResult<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT bookId, title, authorId, Publication, PublishedDate
            FROM Book
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut books = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut book = book_from_row(row)?;
            book.author = self.fetch_author(book.author_id).await?.ok_or_else(|| {
                CatalogError::storage(format!(
                    "book {} references missing author {}",
                    book.id, book.author_id
                ))
            })?;
            books.push(book);
        }

        Ok(books)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> CatalogResult<Book> {
        let id = parse_id(id)?;

        let row = sqlx::query(SELECT_BOOK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| CatalogError::not_found("book", id))?;

        let mut book = book_from_row(&row)?;
        book.author = self
            .fetch_author(book.author_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("author", book.author_id))?;

        Ok(book)
    }

    #[instrument(skip(self, book))]
    async fn replace(&self, id: &str, book: Book) -> CatalogResult<Book> {
        let id = parse_id(id)?;

        if !Self::exists(&self.pool, "Book", "bookId", id).await? {
            return Err(CatalogError::not_found("book", id));
        }

        sqlx::query(
            r#"
            UPDATE Book
            SET title = ?, Publication = ?, PublishedDate = ?
            WHERE bookId = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.publication)
        .bind(&book.published_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(book)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> CatalogResult<u64> {
        let id = parse_id(id)?;

        if !Self::exists(&self.pool, "Book", "bookId", id).await? {
            return Err(CatalogError::not_found("book", id));
        }

        let result = sqlx::query("DELETE FROM Book WHERE bookId = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
