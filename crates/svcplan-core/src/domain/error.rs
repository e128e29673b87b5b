// ============================================================================
// domain/error.rs - CATALOG INGESTION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Only raised at the catalog boundary (building services and catalogs).
/// The ordering and recommendation engines never return errors.
///
/// All errors are:
/// - Cloneable (loaders collect and report them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid service id '{id}': {reason}")]
    InvalidServiceId { id: String, reason: String },

    #[error("Invalid price for service '{service}': {value}")]
    InvalidPrice { service: String, value: String },

    #[error("Invalid phase for service '{service}': {value} (phases start at 1)")]
    InvalidPhase { service: String, value: i64 },

    #[error("Unknown process category '{0}'")]
    UnknownProcessCategory(String),

    #[error("Unknown recommendation direction '{0}'")]
    UnknownDirection(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Duplicate service id in catalog: {id}")]
    DuplicateServiceId { id: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidServiceId { id, .. } => vec![
                format!("Service id '{}' was rejected", id),
                "Ids must be non-empty and contain no whitespace".into(),
                "Examples: analysis-workshop, go_live_support, s1".into(),
            ],
            Self::InvalidPrice { .. } => vec![
                "Prices must be finite and non-negative".into(),
                "Example: price = 1500".into(),
            ],
            Self::InvalidPhase { .. } => vec![
                "Phases are positive integers".into(),
                "  • 1 Analysis, 2 Design, 3 Implementation, 4 Testing, 5 Go-Live".into(),
            ],
            Self::UnknownProcessCategory(value) => vec![
                format!("'{}' is not a process category", value),
                "Supported categories: ideate, innovate, operate".into(),
                "Omit the field to leave the service uncategorized".into(),
            ],
            Self::UnknownDirection(value) => vec![
                format!("'{}' is not a recommendation direction", value),
                "Use 'prerequisites' or 'dependents'".into(),
            ],
            Self::DuplicateServiceId { id } => vec![
                format!("Service id '{}' appears more than once", id),
                "Every service in a catalog needs a unique id".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Add the '{}' field to the service record", field),
            ],
            Self::InvalidCatalog(_) => vec![
                "Check the catalog file syntax".into(),
                "Try: svcplan catalog --check".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidServiceId { .. }
            | Self::InvalidPrice { .. }
            | Self::InvalidPhase { .. }
            | Self::UnknownProcessCategory(_)
            | Self::UnknownDirection(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::DuplicateServiceId { .. } | Self::InvalidCatalog(_) => ErrorCategory::Catalog,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Catalog,
}
