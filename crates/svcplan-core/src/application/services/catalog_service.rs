//! Catalog Service - catalog management operations.
//!
//! Handles service CRUD operations and snapshotting. Separated from
//! CompositionService for single responsibility.

use crate::{
    application::ports::CatalogStore,
    domain::{Catalog, Service},
    error::SvcplanResult,
};

/// Service for catalog operations.
pub struct CatalogService {
    store: Box<dyn CatalogStore>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(store: Box<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Get a service by id.
    pub fn get(&self, id: &str) -> SvcplanResult<Service> {
        self.store.get(id)
    }

    /// Add or update a service.
    pub fn save(&self, service: Service) -> SvcplanResult<()> {
        self.store.insert(service)
    }

    /// Remove a service.
    pub fn remove(&self, id: &str) -> SvcplanResult<()> {
        self.store.remove(id)
    }

    /// List all services in stored order.
    pub fn list(&self) -> SvcplanResult<Vec<Service>> {
        self.store.list()
    }

    /// Immutable snapshot of the current store state.
    pub fn snapshot(&self) -> SvcplanResult<Catalog> {
        let revision = self.store.revision()?;
        Ok(Catalog::with_revision(self.store.list()?, revision)?)
    }
}
