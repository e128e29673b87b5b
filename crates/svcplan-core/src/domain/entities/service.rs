//! The `Service` entity: one purchasable offering of the catalog.
//!
//! A `Service` is immutable and valid by construction. There are two ways in:
//!
//! - [`ServiceBuilder`] for code (tests, built-in catalogs)
//! - [`ServiceRecord`] for data (TOML/JSON manifests), converted with
//!   `Service::try_from(record)`
//!
//! Both funnel through the same checks, so the engines never see a negative
//! price, a zero phase or an empty id.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    error::DomainError,
    value_objects::{Phase, Price, ProcessCategory, ServiceId},
};

/// Catalog record describing a purchasable service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Price,
    pub phase: Phase,
    pub process_category: Option<ProcessCategory>,
    pub technology_category: Option<String>,
    /// Ids of services that should precede this one.
    pub dependencies: BTreeSet<ServiceId>,
}

impl Service {
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::default()
    }

    /// Whether `id` is one of this service's declared prerequisites.
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.contains(id)
    }

    /// Re-check the invariants the builder enforces.
    ///
    /// Services built through the public constructors always pass; this
    /// guards records assembled field-by-field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "title" });
        }
        if Price::new(self.price.amount()).is_none() {
            return Err(DomainError::InvalidPrice {
                service: self.id.to_string(),
                value: self.price.amount().to_string(),
            });
        }
        if self.dependencies.contains(&self.id) {
            return Err(DomainError::InvalidCatalog(format!(
                "service '{}' depends on itself",
                self.id
            )));
        }
        Ok(())
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Fallible builder for [`Service`].
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    id: Option<String>,
    title: Option<String>,
    description: String,
    category: String,
    price: Option<f64>,
    phase: Option<i64>,
    process_category: Option<ProcessCategory>,
    technology_category: Option<String>,
    dependencies: Vec<String>,
}

impl ServiceBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn phase(mut self, phase: i64) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn process_category(mut self, category: ProcessCategory) -> Self {
        self.process_category = Some(category);
        self
    }

    pub fn technology_category(mut self, tag: impl Into<String>) -> Self {
        self.technology_category = Some(tag.into());
        self
    }

    /// Add a single prerequisite (accumulates).
    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Add several prerequisites at once (accumulates).
    pub fn dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Consume builder and construct `Service`.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` if id/title/price/phase not set
    /// - `InvalidServiceId` for empty or whitespace ids (service or dependency)
    /// - `InvalidPrice` for negative or non-finite prices
    /// - `InvalidPhase` for phases below 1
    pub fn build(self) -> Result<Service, DomainError> {
        let raw_id = self
            .id
            .ok_or(DomainError::MissingRequiredField { field: "id" })?;
        let id = ServiceId::parse(&raw_id)?;

        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(DomainError::MissingRequiredField { field: "title" })?;

        let raw_price = self
            .price
            .ok_or(DomainError::MissingRequiredField { field: "price" })?;
        let price = Price::new(raw_price).ok_or_else(|| DomainError::InvalidPrice {
            service: id.to_string(),
            value: raw_price.to_string(),
        })?;

        let raw_phase = self
            .phase
            .ok_or(DomainError::MissingRequiredField { field: "phase" })?;
        let phase = u32::try_from(raw_phase)
            .ok()
            .and_then(Phase::new)
            .ok_or_else(|| DomainError::InvalidPhase {
                service: id.to_string(),
                value: raw_phase,
            })?;

        let mut dependencies = BTreeSet::new();
        for raw in self.dependencies {
            let dep = ServiceId::parse(&raw)?;
            if dep == id {
                debug!(service = %id, "dropping self-dependency");
                continue;
            }
            dependencies.insert(dep);
        }

        Ok(Service {
            id,
            title,
            description: self.description,
            category: self.category,
            price,
            phase,
            process_category: self.process_category,
            technology_category: self.technology_category.filter(|t| !t.trim().is_empty()),
            dependencies,
        })
    }
}

// ── Raw record ───────────────────────────────────────────────────────────────

/// Untyped service record as it appears in catalog manifests.
///
/// Deserialization accepts anything shaped like a service; conversion into
/// [`Service`] applies the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    pub phase: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology_category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl TryFrom<ServiceRecord> for Service {
    type Error = DomainError;

    fn try_from(record: ServiceRecord) -> Result<Self, Self::Error> {
        let mut builder = Service::builder()
            .id(record.id)
            .title(record.title)
            .description(record.description)
            .category(record.category)
            .price(record.price)
            .phase(record.phase)
            .dependencies(record.dependencies);

        // Blank tags count as absent.
        if let Some(tag) = record.process_category.filter(|c| !c.trim().is_empty()) {
            builder = builder.process_category(tag.parse()?);
        }
        if let Some(tag) = record.technology_category {
            builder = builder.technology_category(tag);
        }

        builder.build()
    }
}

impl From<&Service> for ServiceRecord {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id.to_string(),
            title: service.title.clone(),
            description: service.description.clone(),
            category: service.category.clone(),
            price: service.price.amount(),
            phase: i64::from(service.phase.get()),
            process_category: service.process_category.map(|c| c.as_str().to_string()),
            technology_category: service.technology_category.clone(),
            dependencies: service.dependencies.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ServiceRecord {
        ServiceRecord {
            id: id.into(),
            title: format!("Service {id}"),
            description: String::new(),
            category: "Consulting".into(),
            price: 100.0,
            phase: 1,
            process_category: None,
            technology_category: None,
            dependencies: vec![],
        }
    }

    #[test]
    fn builder_builds_minimal_service() {
        let service = Service::builder()
            .id("s1")
            .title("Kickoff")
            .price(100.0)
            .phase(1)
            .build()
            .unwrap();

        assert_eq!(service.id.as_str(), "s1");
        assert_eq!(service.phase, Phase::ANALYSIS);
        assert!(service.process_category.is_none());
        assert!(service.dependencies.is_empty());
    }

    #[test]
    fn builder_requires_price_and_phase() {
        let no_price = Service::builder().id("s1").title("t").phase(1).build();
        assert_eq!(
            no_price.unwrap_err(),
            DomainError::MissingRequiredField { field: "price" }
        );

        let no_phase = Service::builder().id("s1").title("t").price(1.0).build();
        assert_eq!(
            no_phase.unwrap_err(),
            DomainError::MissingRequiredField { field: "phase" }
        );
    }

    #[test]
    fn builder_rejects_negative_price() {
        let result = Service::builder()
            .id("s1")
            .title("t")
            .price(-5.0)
            .phase(1)
            .build();
        assert!(matches!(result, Err(DomainError::InvalidPrice { .. })));
    }

    #[test]
    fn builder_rejects_zero_and_negative_phase() {
        for phase in [0, -3] {
            let result = Service::builder()
                .id("s1")
                .title("t")
                .price(1.0)
                .phase(phase)
                .build();
            assert!(
                matches!(result, Err(DomainError::InvalidPhase { .. })),
                "phase {phase} accepted"
            );
        }
    }

    #[test]
    fn builder_drops_self_dependency() {
        let service = Service::builder()
            .id("s1")
            .title("t")
            .price(1.0)
            .phase(1)
            .depends_on("s1")
            .depends_on("s0")
            .build()
            .unwrap();

        assert!(!service.depends_on("s1"));
        assert!(service.depends_on("s0"));
        assert!(service.validate().is_ok());
    }

    #[test]
    fn duplicate_dependencies_collapse() {
        let service = Service::builder()
            .id("s2")
            .title("t")
            .price(1.0)
            .phase(1)
            .dependencies(["s1", "s1", " s1 "])
            .build()
            .unwrap();

        assert_eq!(service.dependencies.len(), 1);
    }

    #[test]
    fn record_converts_with_tags() {
        let mut raw = record("s1");
        raw.process_category = Some("Innovate".into());
        raw.technology_category = Some("Cloud".into());
        raw.dependencies = vec!["s0".into()];

        let service = Service::try_from(raw).unwrap();
        assert_eq!(service.process_category, Some(ProcessCategory::Innovate));
        assert_eq!(service.technology_category.as_deref(), Some("Cloud"));
        assert!(service.depends_on("s0"));
    }

    #[test]
    fn record_blank_category_is_uncategorized() {
        let mut raw = record("s1");
        raw.process_category = Some("  ".into());
        raw.technology_category = Some(String::new());

        let service = Service::try_from(raw).unwrap();
        assert!(service.process_category.is_none());
        assert!(service.technology_category.is_none());
    }

    #[test]
    fn record_unknown_category_is_rejected() {
        let mut raw = record("s1");
        raw.process_category = Some("deliver".into());

        assert_eq!(
            Service::try_from(raw).unwrap_err(),
            DomainError::UnknownProcessCategory("deliver".into())
        );
    }

    #[test]
    fn record_round_trips_through_service() {
        let mut raw = record("s1");
        raw.process_category = Some("operate".into());
        raw.dependencies = vec!["a".into(), "b".into()];

        let service = Service::try_from(raw.clone()).unwrap();
        assert_eq!(ServiceRecord::from(&service), raw);
    }
}
