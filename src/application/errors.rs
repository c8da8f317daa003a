//! Error types shared by the use cases of each entity family

use thiserror::Error;

use crate::application::ports::{RepositoryError, StorageError};
use crate::domain::errors::DomainError;

/// Errors from product use cases
#[derive(Debug, Error)]
pub enum ProductUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product was written under its new category but the copy under
    /// the old category could not be removed
    #[error("Product {id} moved but its copy under category '{stale_category}' was not removed")]
    RekeyIncomplete { id: String, stale_category: String },
}

/// Errors from catalog image use cases
#[derive(Debug, Error)]
pub enum CatalogImageUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog image not found: {0}")]
    NotFound(String),
}

/// Errors from catalog blob use cases
#[derive(Debug, Error)]
pub enum BlobUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Blob not found: {0}")]
    NotFound(String),
}

/// Errors from person use cases
#[derive(Debug, Error)]
pub enum PersonUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Person not found: {0}")]
    NotFound(String),
}
