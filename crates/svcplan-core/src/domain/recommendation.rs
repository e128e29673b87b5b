//! Recommendation engine: one-hop dependency suggestions, capped.
//!
//! Two directions are supported; each call applies exactly one:
//!
//! - [`RecommendationDirection::Prerequisites`]: services that selected
//!   services declare as dependencies but that are not selected yet.
//! - [`RecommendationDirection::Dependents`]: services that list a selected
//!   service among their own dependencies ("you picked X, Y builds on X").
//!
//! Candidates come out in catalog order and are truncated to
//! [`RECOMMENDATION_LIMIT`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{
    entities::{Catalog, Selection, Service},
    error::DomainError,
    value_objects::ServiceId,
};

/// Maximum number of recommendations returned.
pub const RECOMMENDATION_LIMIT: usize = 3;

/// Which side of a dependency edge to recommend from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationDirection {
    /// Unselected prerequisites of selected services.
    #[default]
    Prerequisites,
    /// Unselected services that depend on a selected service.
    Dependents,
}

impl RecommendationDirection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prerequisites => "prerequisites",
            Self::Dependents => "dependents",
        }
    }
}

impl fmt::Display for RecommendationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prerequisites" | "prereqs" | "backward" => Ok(Self::Prerequisites),
            "dependents" | "forward" => Ok(Self::Dependents),
            other => Err(DomainError::UnknownDirection(other.to_string())),
        }
    }
}

/// Recommend up to [`RECOMMENDATION_LIMIT`] services for `selection`.
///
/// An empty selection or catalog yields no recommendations. Never fails.
#[instrument(skip_all, fields(selected = selection.len(), direction = %direction))]
pub fn recommend(
    catalog: &Catalog,
    selection: &Selection,
    direction: RecommendationDirection,
) -> Vec<Service> {
    let mut candidates = candidates(catalog, selection, direction);
    let total = candidates.len();
    candidates.truncate(RECOMMENDATION_LIMIT);

    debug!(candidates = total, returned = candidates.len(), "recommendations computed");
    candidates.into_iter().cloned().collect()
}

/// Every candidate, uncapped, in catalog order.
pub fn candidates<'a>(
    catalog: &'a Catalog,
    selection: &Selection,
    direction: RecommendationDirection,
) -> Vec<&'a Service> {
    if selection.is_empty() {
        return Vec::new();
    }

    let unselected = catalog
        .all()
        .iter()
        .filter(|service| !selection.contains(service.id.as_str()));

    match direction {
        RecommendationDirection::Prerequisites => {
            let wanted: BTreeSet<&str> = selection
                .resolve(catalog)
                .into_iter()
                .flat_map(|service| service.dependencies.iter().map(ServiceId::as_str))
                .collect();

            unselected
                .filter(|service| wanted.contains(service.id.as_str()))
                .collect()
        }
        RecommendationDirection::Dependents => unselected
            .filter(|service| {
                service
                    .dependencies
                    .iter()
                    .any(|dep| selection.contains(dep.as_str()) && catalog.contains(dep.as_str()))
            })
            .collect(),
    }
}
