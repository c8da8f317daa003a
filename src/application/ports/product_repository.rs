use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Product;
use crate::domain::value_objects::{Category, ProductId};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for product persistence, keyed by `(id, category)`
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or replace the product stored under its `(id, category)` key
    async fn save(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Look up by id across all categories
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    async fn find_by_id_and_category(
        &self,
        id: &ProductId,
        category: &Category,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Upsert under the product's current category key
    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Delete the row stored under `(id, category)`; `NotFound` when absent
    async fn delete(&self, id: &ProductId, category: &Category) -> Result<(), RepositoryError>;
}
