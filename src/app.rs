//! Process wiring: storage -> services -> modules -> HTTP.

use std::sync::Arc;

use anyhow::Context;
use libris_kernel::settings::{DatabaseBackend, Settings};
use libris_kernel::{InitCtx, ModuleRegistry};
use sqlx::MySqlPool;

use crate::modules::{
    self,
    authors::service::DefaultAuthorService,
    books::service::DefaultBookService,
};
use crate::store::{AuthorStore, BookStore, MemoryStore, MySqlStore};

/// Build the module registry over a store serving both tables.
pub fn build_registry<S>(store: Arc<S>) -> ModuleRegistry
where
    S: AuthorStore + BookStore,
{
    let authors = Arc::new(DefaultAuthorService::new(store.clone()));
    let books = Arc::new(DefaultBookService::new(store));

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, authors, books);
    registry
}

/// Run the service until a shutdown signal arrives.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        "libris starting"
    );

    let ctx = InitCtx { settings };

    let registry = match settings.database.backend {
        DatabaseBackend::Mysql => {
            let pool = libris_db::connect(&settings.database).await?;
            let registry = build_registry(Arc::new(MySqlStore::new(pool.clone())));
            registry.init_modules(&ctx).await?;

            if settings.database.run_migrations {
                apply_migrations(&pool, &registry).await?;
            } else {
                tracing::info!("migrations disabled");
            }
            registry
        }
        DatabaseBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on shutdown");
            let registry = build_registry(MemoryStore::new_shared());
            registry.init_modules(&ctx).await?;
            registry
        }
    };

    registry.start_modules(&ctx).await?;

    let served = libris_http::start_server(&registry, &settings.server).await;

    registry.stop_modules().await?;
    served
}

/// Connect and apply pending migrations, then exit.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    if settings.database.backend == DatabaseBackend::Memory {
        tracing::info!("in-memory backend has no schema; nothing to migrate");
        return Ok(0);
    }

    let pool = libris_db::connect(&settings.database).await?;
    let registry = build_registry(Arc::new(MySqlStore::new(pool.clone())));

    let applied = apply_migrations(&pool, &registry).await?;
    pool.close().await;
    Ok(applied)
}

async fn apply_migrations(pool: &MySqlPool, registry: &ModuleRegistry) -> anyhow::Result<usize> {
    let migrations = registry.collect_migrations();
    libris_db::run_migrations(pool, &migrations)
        .await
        .context("failed to apply migrations")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_authors_before_books() {
        let registry = build_registry(MemoryStore::new_shared());

        let names: Vec<&str> = registry.modules().map(|module| module.name()).collect();
        assert_eq!(names, vec!["authors", "books"]);
    }

    #[test]
    fn author_table_is_migrated_first() {
        let registry = build_registry(MemoryStore::new_shared());

        let ids: Vec<(String, &str)> = registry
            .collect_migrations()
            .into_iter()
            .map(|(module, migration)| (module, migration.id))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("authors".to_string(), "001_create_author"),
                ("books".to_string(), "001_create_book"),
            ]
        );
    }

    #[tokio::test]
    async fn migrate_is_a_no_op_for_memory_backend() {
        let mut settings = Settings::default();
        settings.database.backend = DatabaseBackend::Memory;

        assert_eq!(migrate(&settings).await.unwrap(), 0);
    }
}
