pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{InitCtx, Migration, Module};
use utoipa::OpenApi;

use routes::SharedAuthorService;

#[derive(OpenApi)]
#[openapi(
    paths(routes::create_author, routes::update_author, routes::delete_author),
    components(schemas(models::Author)),
    tags((name = "authors", description = "Author records"))
)]
struct AuthorsApi;

/// Authors module: the `Author` table and its HTTP surface.
pub struct AuthorsModule {
    service: SharedAuthorService,
}

impl AuthorsModule {
    pub fn new(service: SharedAuthorService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(AuthorsApi::openapi())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_author",
            up: r#"
                CREATE TABLE IF NOT EXISTS Author (
                    authorId  BIGINT       NOT NULL PRIMARY KEY,
                    firstName VARCHAR(255) NOT NULL,
                    lastName  VARCHAR(255) NOT NULL,
                    dob       VARCHAR(255) NOT NULL,
                    penName   VARCHAR(255) NOT NULL
                ) ENGINE = InnoDB;
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create the authors module over the given service
pub fn create_module(service: SharedAuthorService) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(service))
}
