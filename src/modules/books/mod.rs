pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{InitCtx, Migration, Module};
use utoipa::OpenApi;

use routes::SharedBookService;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::list_books,
        routes::get_book,
        routes::create_book,
        routes::update_book,
        routes::delete_book
    ),
    components(schemas(models::Book, crate::modules::authors::models::Author)),
    tags((name = "books", description = "Book records with their authors"))
)]
struct BooksApi;

/// Books module: the `Book` table and its HTTP surface.
///
/// `Book.authorId` references `Author`, so this module must be registered
/// after the authors module.
pub struct BooksModule {
    service: SharedBookService,
}

impl BooksModule {
    pub fn new(service: SharedBookService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(BooksApi::openapi())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_book",
            up: r#"
                CREATE TABLE IF NOT EXISTS Book (
                    bookId        BIGINT       NOT NULL PRIMARY KEY,
                    title         VARCHAR(255) NOT NULL,
                    authorId      BIGINT       NOT NULL,
                    Publication   VARCHAR(255) NOT NULL,
                    PublishedDate VARCHAR(255) NOT NULL,
                    CONSTRAINT fk_book_author FOREIGN KEY (authorId) REFERENCES Author (authorId)
                ) ENGINE = InnoDB;
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module over the given service
pub fn create_module(service: SharedBookService) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::service::DefaultBookService;
    use crate::store::MemoryStore;

    fn module() -> Arc<dyn Module> {
        let service = Arc::new(DefaultBookService::new(MemoryStore::new_shared()));
        create_module(service)
    }

    #[test]
    fn documents_every_book_route() {
        let doc = module().openapi().unwrap();

        for path in ["/books", "/book", "/book/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let schemas = doc.components.unwrap().schemas;
        assert!(schemas.contains_key("Book"));
        assert!(schemas.contains_key("Author"));
    }

    #[test]
    fn migration_references_author_table() {
        let migrations = module().migrations();

        assert_eq!(migrations[0].id, "001_create_book");
        assert!(migrations[0]
            .up
            .contains("FOREIGN KEY (authorId) REFERENCES Author (authorId)"));
    }
}
