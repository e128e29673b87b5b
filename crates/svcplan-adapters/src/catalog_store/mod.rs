//! Catalog store implementations.

mod memory;

pub use memory::InMemoryCatalogStore;
