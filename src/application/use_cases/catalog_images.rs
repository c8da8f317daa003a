use std::io::Cursor;
use std::sync::Arc;

use crate::application::dto::{CatalogImageResponse, CreateCatalogImageRequest};
use crate::application::errors::CatalogImageUseCaseError;
use crate::application::ports::{BlobStore, CatalogImageRepository, RepositoryError};
use crate::application::validation::{content_type_or_default, validate_file};
use crate::domain::entities::CatalogImage;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{BlobName, CatalogImageId, Category, ContainerDefinition};

/// Use case: Upload an image to the catalog-images container and record it
pub struct CreateCatalogImageUseCase {
    repository: Arc<dyn CatalogImageRepository>,
    blob_store: Arc<dyn BlobStore>,
    container: ContainerDefinition,
}

impl CreateCatalogImageUseCase {
    pub fn new(
        repository: Arc<dyn CatalogImageRepository>,
        blob_store: Arc<dyn BlobStore>,
        container: ContainerDefinition,
    ) -> Self {
        Self {
            repository,
            blob_store,
            container,
        }
    }

    pub async fn execute(
        &self,
        request: CreateCatalogImageRequest,
    ) -> Result<CatalogImageResponse, CatalogImageUseCaseError> {
        // 1. Validate inputs before touching any store
        let file = validate_file(request.file.as_ref(), &self.container)?;
        let category = match request.product_category {
            Some(value) if !value.trim().is_empty() => Category::new(value)?,
            _ => {
                return Err(DomainError::Validation {
                    field: "productCategory".to_string(),
                    message: "Product category is required".to_string(),
                }
                .into())
            }
        };

        // 2. Upload blob as "{id}-{file name}"
        let id = CatalogImageId::new();
        let blob_name = BlobName::for_upload(*id.as_uuid(), &file.file_name);
        let content_type = content_type_or_default(file.content_type.as_deref());

        let stored = self
            .blob_store
            .upload(
                self.container.name(),
                &blob_name,
                Box::pin(Cursor::new(file.content.clone())),
                &content_type,
            )
            .await?;

        // 3. Record the image
        let image = CatalogImage::new(id, blob_name, stored.url, category);
        if let Err(e) = self.repository.save(&image).await {
            tracing::error!(
                image_id = %id,
                blob_name = %image.blob_name(),
                "Failed to save catalog image record, removing uploaded blob: {}",
                e
            );
            if let Err(cleanup) = self
                .blob_store
                .delete(self.container.name(), image.blob_name())
                .await
            {
                tracing::warn!(blob_name = %image.blob_name(), "Blob cleanup failed: {}", cleanup);
            }
            return Err(e.into());
        }

        tracing::info!(image_id = %id, blob_name = %image.blob_name(), "Catalog image created");
        Ok(CatalogImageResponse::from(image))
    }
}

/// Use case: List every catalog image
pub struct ListAllCatalogImagesUseCase {
    repository: Arc<dyn CatalogImageRepository>,
}

impl ListAllCatalogImagesUseCase {
    pub fn new(repository: Arc<dyn CatalogImageRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<CatalogImageResponse>, CatalogImageUseCaseError> {
        let images = self.repository.list_all().await?;
        Ok(images.into_iter().map(CatalogImageResponse::from).collect())
    }
}

/// Use case: Get one catalog image by id
pub struct ListCatalogImageByIdUseCase {
    repository: Arc<dyn CatalogImageRepository>,
}

impl ListCatalogImageByIdUseCase {
    pub fn new(repository: Arc<dyn CatalogImageRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> Result<CatalogImageResponse, CatalogImageUseCaseError> {
        let id: CatalogImageId = id.parse()?;

        self.repository
            .find_by_id(&id)
            .await?
            .map(CatalogImageResponse::from)
            .ok_or_else(|| CatalogImageUseCaseError::NotFound(id.to_string()))
    }
}

/// Use case: Delete a catalog image's blob, then its record
pub struct DeleteCatalogImageUseCase {
    repository: Arc<dyn CatalogImageRepository>,
    blob_store: Arc<dyn BlobStore>,
    container: ContainerDefinition,
}

impl DeleteCatalogImageUseCase {
    pub fn new(
        repository: Arc<dyn CatalogImageRepository>,
        blob_store: Arc<dyn BlobStore>,
        container: ContainerDefinition,
    ) -> Self {
        Self {
            repository,
            blob_store,
            container,
        }
    }

    pub async fn execute(&self, id: &str) -> Result<(), CatalogImageUseCaseError> {
        let id: CatalogImageId = id.parse()?;

        let image = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CatalogImageUseCaseError::NotFound(id.to_string()))?;

        let removed = self
            .blob_store
            .delete(self.container.name(), image.blob_name())
            .await?;
        if !removed {
            tracing::warn!(image_id = %id, blob_name = %image.blob_name(), "Blob was already gone");
        }

        match self.repository.delete(&id, image.product_category()).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound(_)) => {
                return Err(CatalogImageUseCaseError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(image_id = %id, "Catalog image deleted");
        Ok(())
    }
}
