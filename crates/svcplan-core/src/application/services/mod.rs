//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "list the catalog" or "compose a plan".

pub mod catalog_service;
pub mod composition_service;

pub use catalog_service::CatalogService;
pub use composition_service::{Composition, CompositionService};
