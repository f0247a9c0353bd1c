pub mod certificate;
pub mod contact;
pub mod domain;
pub mod ids;
pub mod patch;
pub mod query;
pub mod research;
pub mod ssl_contact;
pub mod user;


pub use ids::RecordId;
pub use patch::Patch;
pub use query::{FilterDescriptor, Link, Operator, QuerySpec, QueryView, SearchRequest, ViewOverrides};
