// Domain layer - builds registry payloads and resolves referenced records.
// No HTTP concerns live here; handlers validate input and then call in.

pub mod bulk;
pub mod certificates;
pub mod contacts;
pub mod csr;
pub mod domains;
pub mod query;
pub mod research;
pub mod users;

use serde_json::{Map, Value};

use crate::registry::{first_record, RegistryError};

// Domain error type - no HTTP concerns
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("CSR generation failed: {0}")]
    Csr(#[from] csr::CsrError),

    #[error("Failed to build payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// `data[0]` of an `info` answer as a mutable JSON object
pub(crate) fn fetched_record(
    result: Value,
    resource: &'static str,
    id: &str,
) -> Result<Map<String, Value>> {
    match first_record(result, resource, id)? {
        Value::Object(record) => Ok(record),
        _ => Err(RegistryError::MalformedRecord { resource }.into()),
    }
}

// Re-export commonly used types and functions
pub use csr::{generate_csr, CsrBundle, CsrError};
pub use query::build_query;
