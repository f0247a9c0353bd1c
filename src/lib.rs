pub mod api;
pub mod config;
pub mod domain;
pub mod models;
pub mod registry;

// Re-export commonly used types
pub use api::{create_app, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use domain::{build_query, generate_csr, CsrBundle, DomainError};
pub use models::{FilterDescriptor, Operator, Patch, QuerySpec, RecordId, SearchRequest};
pub use registry::{
    ClientIdentity, HttpTransport, PassthroughHeaders, RegistryClient, RegistryError,
    RegistryRequest, RegistryTransport,
};
