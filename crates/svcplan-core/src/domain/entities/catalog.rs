//! The authoritative list of services with id lookup.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{entities::service::Service, error::DomainError};

/// Immutable catalog snapshot.
///
/// Stored order is preserved and used as the final tie-break by the ordering
/// engine. Every snapshot carries a `revision` identifying the store state it
/// was built from.
#[derive(Debug, Clone)]
pub struct Catalog {
    revision: Uuid,
    services: Vec<Service>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog with a fresh revision.
    ///
    /// # Errors
    ///
    /// `DuplicateServiceId` if two services share an id.
    pub fn new(services: Vec<Service>) -> Result<Self, DomainError> {
        Self::with_revision(services, Uuid::new_v4())
    }

    /// Build a catalog for a known store revision.
    pub fn with_revision(services: Vec<Service>, revision: Uuid) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(services.len());

        for (position, service) in services.iter().enumerate() {
            if index.insert(service.id.to_string(), position).is_some() {
                return Err(DomainError::DuplicateServiceId {
                    id: service.id.to_string(),
                });
            }
        }

        Ok(Self {
            revision,
            services,
            index,
        })
    }

    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            revision: Uuid::nil(),
            services: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Look a service up by id. Unknown ids are `None`, never an error.
    pub fn lookup(&self, id: &str) -> Option<&Service> {
        self.index.get(id).map(|&position| &self.services[position])
    }

    /// Position of a service in stored order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All services in stored order.
    pub fn all(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn revision(&self) -> Uuid {
        self.revision
    }

    /// `(service, missing dependency)` pairs for every dependency that does
    /// not resolve. The engines ignore these; this is a diagnostic listing.
    pub fn dangling_dependencies(&self) -> Vec<(&Service, &str)> {
        self.services
            .iter()
            .flat_map(|service| {
                service
                    .dependencies
                    .iter()
                    .filter(|dep| !self.contains(dep.as_str()))
                    .map(move |dep| (service, dep.as_str()))
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, deps: &[&str]) -> Service {
        Service::builder()
            .id(id)
            .title(id)
            .price(10.0)
            .phase(1)
            .dependencies(deps.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_finds_known_ids() {
        let catalog = Catalog::new(vec![service("a", &[]), service("b", &[])]).unwrap();

        assert_eq!(catalog.lookup("b").map(|s| s.id.as_str()), Some("b"));
        assert_eq!(catalog.position("b"), Some(1));
        assert!(catalog.lookup("zzz").is_none());
    }

    #[test]
    fn all_preserves_stored_order() {
        let catalog =
            Catalog::new(vec![service("c", &[]), service("a", &[]), service("b", &[])]).unwrap();
        let ids: Vec<_> = catalog.all().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new(vec![service("a", &[]), service("a", &[])]);
        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateServiceId { id: "a".into() }
        );
    }

    #[test]
    fn revision_is_kept() {
        let rev = Uuid::new_v4();
        let catalog = Catalog::with_revision(vec![service("a", &[])], rev).unwrap();
        assert_eq!(catalog.revision(), rev);
    }

    #[test]
    fn dangling_dependencies_are_listed() {
        let catalog = Catalog::new(vec![
            service("a", &[]),
            service("b", &["a", "ghost"]),
        ])
        .unwrap();

        let dangling: Vec<_> = catalog
            .dangling_dependencies()
            .into_iter()
            .map(|(s, dep)| (s.id.as_str(), dep))
            .collect();
        assert_eq!(dangling, [("b", "ghost")]);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.lookup("a").is_none());
    }
}
