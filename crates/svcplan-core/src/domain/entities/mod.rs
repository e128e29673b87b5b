pub mod catalog;
pub mod selection;
pub mod service;

pub use crate::domain::DomainError;
pub use catalog::Catalog;
pub use selection::{Selection, Toggle};
pub use service::{Service, ServiceBuilder, ServiceRecord};
