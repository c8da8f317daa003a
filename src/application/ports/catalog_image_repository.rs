use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::CatalogImage;
use crate::domain::value_objects::{CatalogImageId, Category};
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for catalog image records, keyed by `(id, product_category)`
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogImageRepository: Send + Sync {
    async fn save(&self, image: &CatalogImage) -> Result<(), RepositoryError>;

    async fn list_all(&self) -> Result<Vec<CatalogImage>, RepositoryError>;

    async fn find_by_id(&self, id: &CatalogImageId)
        -> Result<Option<CatalogImage>, RepositoryError>;

    async fn find_by_id_and_category(
        &self,
        id: &CatalogImageId,
        category: &Category,
    ) -> Result<Option<CatalogImage>, RepositoryError>;

    async fn delete(&self, id: &CatalogImageId, category: &Category)
        -> Result<(), RepositoryError>;
}
