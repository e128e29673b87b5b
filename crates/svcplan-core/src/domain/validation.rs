use crate::domain::{
    entities::{Service, ServiceRecord},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Ingestion paths (stores, loaders) call these instead of reaching into
/// entities directly.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_service(service: &Service) -> Result<(), DomainError> {
        service.validate()
    }

    /// Convert and validate a raw manifest record.
    pub fn validate_record(record: ServiceRecord) -> Result<Service, DomainError> {
        Service::try_from(record)
    }
}
