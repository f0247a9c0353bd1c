pub mod error;
pub mod handlers;
pub mod passthrough;
pub mod server;
pub mod utils;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use server::{create_app, AppState};
