//! Shared API types: error bodies and the JSON extractor

pub mod error;
pub mod json;

pub use error::{ApiError, ErrorBody};
pub use json::Json;
