//! Libris: a library catalog of authors and books.
//!
//! Three layers per entity: a storage adapter ([`store`]), a service that
//! validates input before delegating to storage, and axum handlers. Each
//! entity is packaged as a kernel [`Module`](libris_kernel::Module).

pub mod app;
pub mod error;
pub mod modules;
pub mod store;
pub mod utils;

pub use error::{CatalogError, CatalogResult};
pub use modules::authors::models::Author;
pub use modules::books::models::{Book, Publication};
