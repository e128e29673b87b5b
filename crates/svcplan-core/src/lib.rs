//! Svcplan Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for svcplan, a
//! service composition engine: pick consulting services from a catalog,
//! get them back in execution order with a running total and a short list
//! of related services worth adding.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           svcplan-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (CompositionService, CatalogService)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │           (Driven: CatalogStore)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     svcplan-adapters (Infrastructure)   │
//! │ (InMemoryCatalogStore, catalog loaders) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Catalog, Selection, ordering, recs)   │
//! │         No I/O, never fails             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use svcplan_core::{
//!     application::CompositionService,
//!     domain::Selection,
//! };
//!
//! # fn demo(store: Box<dyn svcplan_core::application::CatalogStore>) -> svcplan_core::error::SvcplanResult<()> {
//! let service = CompositionService::new(store);
//! let catalog = service.catalog()?;
//!
//! let mut selection = Selection::new();
//! selection.toggle(&catalog, "analysis-workshop");
//!
//! let composition = service.compose(&selection)?;
//! println!("total: {}", composition.total_price);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, Composition, CompositionService, ports::CatalogStore,
    };
    pub use crate::domain::{
        Catalog, ExecutionPlan, Phase, Price, ProcessCategory, RecommendationDirection, Selection,
        Service, ServiceBuilder, ServiceId, ServiceRecord, Toggle,
    };
    pub use crate::error::{SvcplanError, SvcplanResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
