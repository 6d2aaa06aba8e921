//! Kernel for Libris: layered settings, the `Module` contract, and the
//! registry that drives module lifecycle and migrations.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
