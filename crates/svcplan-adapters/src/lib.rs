//! Infrastructure adapters for svcplan.
//!
//! This crate implements the ports defined in `svcplan-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_catalog;
pub mod catalog_loader;
pub mod catalog_store;

// Re-export commonly used adapters
pub use catalog_loader::{CatalogDirLoader, CatalogFileLoader, CatalogManifest};
pub use catalog_store::InMemoryCatalogStore;
