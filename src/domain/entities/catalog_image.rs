use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{BlobName, CatalogImageId, Category};

/// Catalog image record pointing at a blob in the catalog-images container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    id: CatalogImageId,
    blob_name: BlobName,
    blob_url: String,
    product_category: Category,
}

impl CatalogImage {
    pub fn new(
        id: CatalogImageId,
        blob_name: BlobName,
        blob_url: String,
        product_category: Category,
    ) -> Self {
        Self {
            id,
            blob_name,
            blob_url,
            product_category,
        }
    }

    pub fn id(&self) -> &CatalogImageId {
        &self.id
    }

    pub fn blob_name(&self) -> &BlobName {
        &self.blob_name
    }

    pub fn blob_url(&self) -> &str {
        &self.blob_url
    }

    pub fn product_category(&self) -> &Category {
        &self.product_category
    }
}
