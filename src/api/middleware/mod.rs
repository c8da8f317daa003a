pub mod cors;
pub mod error_handling;

pub use cors::create_cors_layer_for_environment;
pub use error_handling::{create_error_handling_middleware, panic_response};
