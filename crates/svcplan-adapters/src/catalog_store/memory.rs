//! In-memory catalog store.

use std::{
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::debug;
use uuid::Uuid;

use svcplan_core::{
    application::{ApplicationError, ports::CatalogStore},
    domain::{DomainValidator, Service},
    error::SvcplanResult,
};

use crate::builtin_catalog::{self, CatalogSource};

#[derive(Debug)]
struct State {
    services: Vec<Service>,
    revision: Uuid,
}

impl State {
    fn touch(&mut self) {
        self.revision = Uuid::new_v4();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.services.iter().position(|s| s.id.as_str() == id)
    }
}

/// Thread-safe in-memory catalog store.
///
/// Keeps insertion order. Every mutation assigns a new revision.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogStore {
    inner: Arc<RwLock<State>>,
}

impl InMemoryCatalogStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(State {
                services: Vec::new(),
                revision: Uuid::new_v4(),
            })),
        }
    }

    /// Create a store seeded with `services`, in order.
    pub fn from_services(services: impl IntoIterator<Item = Service>) -> SvcplanResult<Self> {
        let store = Self::new();
        for service in services {
            store.insert(service)?;
        }
        Ok(store)
    }

    /// Create a store with the built-in catalog loaded.
    ///
    /// Returns where the catalog came from alongside the store.
    pub fn with_builtin() -> SvcplanResult<(Self, CatalogSource)> {
        let (services, source) = builtin_catalog::load()?;
        Ok((Self::from_services(services)?, source))
    }

    /// Create a store from a manifest file or directory.
    pub fn from_path(path: impl AsRef<Path>) -> SvcplanResult<Self> {
        Self::from_services(builtin_catalog::load_path(path.as_ref())?)
    }

    /// Get the number of services.
    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.services.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all services.
    pub fn clear(&self) -> SvcplanResult<()> {
        let mut state = self.write()?;
        state.services.clear();
        state.touch();
        Ok(())
    }

    fn read(&self) -> SvcplanResult<RwLockReadGuard<'_, State>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> SvcplanResult<RwLockWriteGuard<'_, State>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn list(&self) -> SvcplanResult<Vec<Service>> {
        Ok(self.read()?.services.clone())
    }

    fn get(&self, id: &str) -> SvcplanResult<Service> {
        let state = self.read()?;
        state
            .position(id)
            .map(|i| state.services[i].clone())
            .ok_or_else(|| ApplicationError::ServiceNotFound { id: id.into() }.into())
    }

    fn insert(&self, service: Service) -> SvcplanResult<()> {
        // Validate before insertion
        DomainValidator::validate_service(&service)?;

        let mut state = self.write()?;
        match state.position(service.id.as_str()) {
            Some(i) => {
                debug!(id = %service.id, "replacing service");
                state.services[i] = service;
            }
            None => state.services.push(service),
        }
        state.touch();
        Ok(())
    }

    fn remove(&self, id: &str) -> SvcplanResult<()> {
        let mut state = self.write()?;
        let index = state
            .position(id)
            .ok_or_else(|| ApplicationError::ServiceNotFound { id: id.into() })?;
        state.services.remove(index);
        state.touch();
        Ok(())
    }

    fn revision(&self) -> SvcplanResult<Uuid> {
        Ok(self.read()?.revision)
    }
}
