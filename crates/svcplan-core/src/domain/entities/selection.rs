//! The caller-owned set of chosen service ids.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    entities::{catalog::Catalog, service::Service},
    value_objects::{Price, ServiceId},
};

/// Outcome of [`Selection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// Unknown id; nothing changed.
    Ignored,
}

/// Set of selected service ids.
///
/// Iteration is sorted by id, so snapshots compare and hash deterministically.
/// The engines only ever read a selection; all mutation goes through the
/// methods here and is serialized by the owner through `&mut self`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<ServiceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw ids, keeping only those the catalog knows.
    pub fn from_ids<I, S>(catalog: &Catalog, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.add(catalog, id.as_ref());
        }
        selection
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// An id the catalog does not know leaves the selection untouched, even
    /// if it is currently selected. Use [`Selection::remove`] or
    /// [`Selection::clear`] to drop ids that stopped resolving.
    pub fn toggle(&mut self, catalog: &Catalog, id: &str) -> Toggle {
        if !catalog.contains(id) {
            debug!(id, "ignoring toggle of unknown service id");
            Toggle::Ignored
        } else if self.remove(id) {
            Toggle::Removed
        } else if self.add(catalog, id) {
            Toggle::Added
        } else {
            Toggle::Ignored
        }
    }

    /// Insert a known id. Returns `false` for unknown or already selected ids.
    pub fn add(&mut self, catalog: &Catalog, id: &str) -> bool {
        match catalog.lookup(id) {
            Some(service) => self.ids.insert(service.id.clone()),
            None => {
                debug!(id, "ignoring unknown service id");
                false
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceId> {
        self.ids.iter()
    }

    /// Selected services that resolve in `catalog`, in catalog order.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Service> {
        catalog
            .all()
            .iter()
            .filter(|service| self.ids.contains(&service.id))
            .collect()
    }

    /// Sum of the prices of selected ids that resolve in `catalog`.
    ///
    /// Ids that no longer resolve are left out of the sum.
    pub fn total_price(&self, catalog: &Catalog) -> Price {
        self.ids
            .iter()
            .filter_map(|id| catalog.lookup(id.as_str()))
            .map(|service| service.price)
            .sum()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a ServiceId;
    type IntoIter = std::collections::btree_set::Iter<'a, ServiceId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
