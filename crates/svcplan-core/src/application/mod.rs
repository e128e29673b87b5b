//! Application layer for svcplan.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CatalogService, CompositionService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Ordering and recommendation rules live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CatalogService, Composition, CompositionService};

// Re-export port traits (for adapter implementation)
pub use ports::CatalogStore;

pub use error::ApplicationError;
