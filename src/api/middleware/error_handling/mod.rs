//! Error envelope middleware
//!
//! Responses built from `ApiError` already carry the JSON envelope and pass
//! through untouched. Every other 4xx/5xx (extractor rejections, unmatched
//! routes, body limit violations, panics) is rewritten into the same shape.

pub mod middleware;
pub mod utils;

pub use middleware::{create_error_handling_middleware, ErrorHandlingLayer};
pub use utils::{panic_response, sanitize_db_error, ErrorUtils};
