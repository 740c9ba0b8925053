//! REST API modules.

pub mod ceps;
pub mod error;
pub mod health;

pub use error::{ApiError, ApiResult};
