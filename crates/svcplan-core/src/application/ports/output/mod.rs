//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `svcplan-adapters` crate provides implementations.

use uuid::Uuid;

use crate::domain::Service;
use crate::error::SvcplanResult;

/// Port for catalog storage and retrieval.
///
/// Implemented by:
/// - `svcplan_adapters::InMemoryCatalogStore` (built-in and file-backed catalogs)
///
/// ## Design Notes
///
/// - `list` returns services in stored order; the ordering engine uses that
///   order as its final tie-break, so stores must keep it stable
/// - `revision` changes on every mutation and identifies the snapshot
///   `list` returns; callers memoize on it
#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore: Send + Sync {
    /// All services in stored order.
    fn list(&self) -> SvcplanResult<Vec<Service>>;

    /// Get a specific service by id.
    fn get(&self, id: &str) -> SvcplanResult<Service>;

    /// Insert a service, replacing one with the same id in place.
    fn insert(&self, service: Service) -> SvcplanResult<()>;

    /// Remove a service.
    fn remove(&self, id: &str) -> SvcplanResult<()>;

    /// Identifier of the current store state.
    fn revision(&self) -> SvcplanResult<Uuid>;
}
