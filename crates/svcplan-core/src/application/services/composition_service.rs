//! Composition Service - main application orchestrator.
//!
//! This service coordinates one composition round:
//! 1. Snapshot the catalog from the store (reused while the revision holds)
//! 2. Total the selection
//! 3. Order and group it
//! 4. Recommend follow-up services
//!
//! Results are memoized on `(catalog revision, selection, direction)`.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::CatalogStore},
    domain::{
        Catalog, ExecutionPlan, Price, RecommendationDirection, Selection, Service, ordering,
        recommendation,
    },
    error::SvcplanResult,
};

/// Everything the UI needs to display for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub revision: Uuid,
    pub selection: Selection,
    pub total_price: Price,
    pub plan: ExecutionPlan,
    pub direction: RecommendationDirection,
    pub recommendations: Vec<Service>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CompositionKey {
    revision: Uuid,
    selection: Selection,
    direction: RecommendationDirection,
}

#[derive(Debug, Default)]
struct Memo {
    catalog: Option<Arc<Catalog>>,
    composition: Option<(CompositionKey, Composition)>,
}

/// Main composition service.
pub struct CompositionService {
    store: Box<dyn CatalogStore>,
    direction: RecommendationDirection,
    memo: Mutex<Memo>,
}

impl CompositionService {
    /// Create a new composition service over the given store.
    pub fn new(store: Box<dyn CatalogStore>) -> Self {
        Self {
            store,
            direction: RecommendationDirection::default(),
            memo: Mutex::new(Memo::default()),
        }
    }

    /// Set the recommendation direction used by [`Self::compose`].
    pub fn with_direction(mut self, direction: RecommendationDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn direction(&self) -> RecommendationDirection {
        self.direction
    }

    /// Current catalog snapshot.
    ///
    /// Rebuilt only when the store revision changes.
    pub fn catalog(&self) -> SvcplanResult<Arc<Catalog>> {
        let revision = self.store.revision()?;
        let mut memo = self
            .memo
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if let Some(catalog) = memo.catalog.as_ref().filter(|c| c.revision() == revision) {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(Catalog::with_revision(self.store.list()?, revision)?);
        debug!(%revision, services = catalog.len(), "catalog snapshot rebuilt");
        memo.catalog = Some(Arc::clone(&catalog));
        memo.composition = None;
        Ok(catalog)
    }

    /// Compose `selection` with the configured recommendation direction.
    pub fn compose(&self, selection: &Selection) -> SvcplanResult<Composition> {
        self.compose_with(selection, self.direction)
    }

    /// Compose `selection` with an explicit recommendation direction.
    #[instrument(skip_all, fields(selected = selection.len(), direction = %direction))]
    pub fn compose_with(
        &self,
        selection: &Selection,
        direction: RecommendationDirection,
    ) -> SvcplanResult<Composition> {
        let catalog = self.catalog()?;
        let key = CompositionKey {
            revision: catalog.revision(),
            selection: selection.clone(),
            direction,
        };

        {
            let memo = self
                .memo
                .lock()
                .map_err(|_| ApplicationError::StoreLockError)?;
            if let Some((cached_key, composition)) = &memo.composition {
                if *cached_key == key {
                    debug!("reusing memoized composition");
                    return Ok(composition.clone());
                }
            }
        }

        let composition = Composition {
            revision: catalog.revision(),
            selection: selection.clone(),
            total_price: selection.total_price(&catalog),
            plan: ordering::plan(&catalog, selection),
            direction,
            recommendations: recommendation::recommend(&catalog, selection, direction),
        };

        info!(
            services = composition.plan.len(),
            total = %composition.total_price,
            recommendations = composition.recommendations.len(),
            "composition computed"
        );

        let mut memo = self
            .memo
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        memo.composition = Some((key, composition.clone()));

        Ok(composition)
    }

    /// Recommendations only.
    pub fn recommend(
        &self,
        selection: &Selection,
        direction: RecommendationDirection,
    ) -> SvcplanResult<Vec<Service>> {
        let catalog = self.catalog()?;
        Ok(recommendation::recommend(&catalog, selection, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockCatalogStore;
    use mockall::Sequence;

    fn service(id: &str, phase: i64, price: f64, deps: &[&str]) -> Service {
        Service::builder()
            .id(id)
            .title(id)
            .price(price)
            .phase(phase)
            .dependencies(deps.iter().copied())
            .build()
            .unwrap()
    }

    fn scenario() -> Vec<Service> {
        vec![
            service("A", 1, 100.0, &[]),
            service("B", 1, 200.0, &["A"]),
            service("C", 2, 50.0, &[]),
        ]
    }

    fn fixed_store(revision: Uuid, list_calls: usize) -> MockCatalogStore {
        let mut store = MockCatalogStore::new();
        store.expect_revision().returning(move || Ok(revision));
        store
            .expect_list()
            .times(list_calls)
            .returning(|| Ok(scenario()));
        store
    }

    #[test]
    fn compose_orders_totals_and_recommends() {
        let service = CompositionService::new(Box::new(fixed_store(Uuid::new_v4(), 1)));
        let catalog = service.catalog().unwrap();
        let selection = Selection::from_ids(&catalog, ["B", "C"]);

        let composition = service.compose(&selection).unwrap();
        assert_eq!(composition.plan.ids(), ["B", "C"]);
        assert_eq!(composition.total_price.amount(), 250.0);
        let recs: Vec<_> = composition
            .recommendations
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(recs, ["A"]);
    }

    #[test]
    fn end_to_end_scenario() {
        let service = CompositionService::new(Box::new(fixed_store(Uuid::new_v4(), 1)));
        let catalog = service.catalog().unwrap();
        let selection = Selection::from_ids(&catalog, ["B", "C", "A"]);

        let composition = service.compose(&selection).unwrap();
        assert_eq!(composition.plan.ids(), ["A", "B", "C"]);
        assert_eq!(composition.total_price.amount(), 350.0);
        assert!(composition.recommendations.is_empty());
    }

    #[test]
    fn catalog_is_listed_once_per_revision() {
        // `times(1)` on list: the second compose must hit the memo.
        let service = CompositionService::new(Box::new(fixed_store(Uuid::new_v4(), 1)));
        let catalog = service.catalog().unwrap();
        let selection = Selection::from_ids(&catalog, ["A"]);

        let first = service.compose(&selection).unwrap();
        let second = service.compose(&selection).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn new_revision_rebuilds_catalog() {
        let (r1, r2) = (Uuid::new_v4(), Uuid::new_v4());
        let mut seq = Sequence::new();
        let mut store = MockCatalogStore::new();

        store
            .expect_revision()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(r1));
        store
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(scenario()));
        store
            .expect_revision()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(r2));
        store
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![service("A", 1, 100.0, &[])]));

        let service = CompositionService::new(Box::new(store));
        assert_eq!(service.catalog().unwrap().len(), 3);

        let rebuilt = service.catalog().unwrap();
        assert_eq!(rebuilt.len(), 1);
        assert_eq!(rebuilt.revision(), r2);
    }

    #[test]
    fn direction_is_configurable() {
        let service = CompositionService::new(Box::new(fixed_store(Uuid::new_v4(), 1)))
            .with_direction(RecommendationDirection::Dependents);
        let catalog = service.catalog().unwrap();
        let selection = Selection::from_ids(&catalog, ["A"]);

        let composition = service.compose(&selection).unwrap();
        assert_eq!(composition.direction, RecommendationDirection::Dependents);
        let recs: Vec<_> = composition
            .recommendations
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(recs, ["B"]);
    }

    #[test]
    fn empty_selection_composes_to_nothing() {
        let service = CompositionService::new(Box::new(fixed_store(Uuid::new_v4(), 1)));
        let composition = service.compose(&Selection::new()).unwrap();

        assert!(composition.plan.is_empty());
        assert!(composition.recommendations.is_empty());
        assert_eq!(composition.total_price, Price::ZERO);
    }

    #[test]
    fn store_errors_propagate() {
        let mut store = MockCatalogStore::new();
        store
            .expect_revision()
            .returning(|| Err(ApplicationError::StoreLockError.into()));

        let service = CompositionService::new(Box::new(store));
        assert!(service.compose(&Selection::new()).is_err());
    }
}
