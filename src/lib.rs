//! # Catalog Service
//!
//! HTTP backend for a product catalog: products partitioned by category,
//! catalog images backed by blob storage, raw catalog blobs and a people
//! directory.
//!
//! ## Architecture Layers
//!
//! - **Domain**: entities, value objects, domain errors
//! - **Application**: use cases and ports
//! - **Infrastructure**: Postgres and in-memory repositories, filesystem blob store
//! - **API**: axum handlers, middleware and the OpenAPI document
//!
//! ## Example Usage
//!
//! ```no_run
//! use catalog_service::{api::create_router, application::builder::ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = Config::from_env()?;
//! let state = ApplicationBuilder::new(config)
//!     .with_database()
//!     .await?
//!     .with_infrastructure()
//!     .await?
//!     .build()?;
//! let app = create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
