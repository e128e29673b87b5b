// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for svcplan.
//!
//! This module contains pure business logic: the catalog model, the
//! selection state and the two engines. All loading and rendering concerns
//! are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Pure engines**: `ordering::plan` and `recommendation::recommend` are
//!   functions of `(&Catalog, &Selection)` and never fail
//! - **Immutable entities**: `Service` and `Catalog` are Clone and read-only
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod ordering;
pub mod recommendation;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    catalog::Catalog,
    selection::{Selection, Toggle},
    service::{Service, ServiceBuilder, ServiceRecord},
};

pub use error::{DomainError, ErrorCategory};

pub use ordering::{CategoryGroup, CategoryKey, ExecutionPlan, PhaseGroup};
pub use recommendation::{RECOMMENDATION_LIMIT, RecommendationDirection};

pub use value_objects::{Phase, Price, ProcessCategory, ServiceId};

pub use validation::DomainValidator;
