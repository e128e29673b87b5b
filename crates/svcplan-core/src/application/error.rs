//! Application layer errors.
//!
//! These errors represent failures in orchestration (loading, storage),
//! not business logic. Business logic errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A requested service is not in the store.
    #[error("Service not found: {id}")]
    ServiceNotFound { id: String },

    /// A catalog source could not be read or parsed.
    #[error("Failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    /// Store or cache access failed (lock poisoned).
    #[error("Catalog store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ServiceNotFound { id } => vec![
                format!("No service with id '{}'", id),
                "Try: svcplan catalog to see available services".into(),
            ],
            Self::CatalogLoad { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the file exists and is valid TOML or JSON".into(),
                "Or point --catalog / SVCPLAN_CATALOG at another catalog".into(),
            ],
            Self::StoreLockError => vec![
                "The catalog store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ServiceNotFound { .. } => ErrorCategory::NotFound,
            Self::CatalogLoad { .. } => ErrorCategory::Configuration,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
