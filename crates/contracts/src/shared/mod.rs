pub mod config;
pub mod envelope;
pub mod error;
pub mod list_query;
pub mod validation;

pub use error::{ApiError, ApiResult};
