use std::io::Cursor;
use std::sync::Arc;

use uuid::Uuid;

use crate::application::dto::{BlobResponse, FileUpload};
use crate::application::errors::BlobUseCaseError;
use crate::application::ports::{BlobReader, BlobStore, StorageError};
use crate::application::validation::{content_type_or_default, validate_file};
use crate::domain::value_objects::{BlobName, ContainerDefinition, ContainerName};

/// Use case: Upload a file to the catalog container
pub struct UploadCatalogBlobUseCase {
    blob_store: Arc<dyn BlobStore>,
    container: ContainerDefinition,
}

impl UploadCatalogBlobUseCase {
    pub fn new(blob_store: Arc<dyn BlobStore>, container: ContainerDefinition) -> Self {
        Self {
            blob_store,
            container,
        }
    }

    pub async fn execute(&self, file: Option<FileUpload>) -> Result<BlobResponse, BlobUseCaseError> {
        let file = validate_file(file.as_ref(), &self.container)?;

        let blob_name = BlobName::for_upload(Uuid::new_v4(), &file.file_name);
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

        tracing::info!(
            container = %self.container.name(),
            blob_name = %stored.name,
            size_bytes = stored.size_bytes,
            "Catalog blob uploaded"
        );
        Ok(BlobResponse::from(stored))
    }
}

/// Use case: List blobs in the catalog container
pub struct ListCatalogBlobsUseCase {
    blob_store: Arc<dyn BlobStore>,
    container: ContainerName,
}

impl ListCatalogBlobsUseCase {
    pub fn new(blob_store: Arc<dyn BlobStore>, container: ContainerName) -> Self {
        Self {
            blob_store,
            container,
        }
    }

    pub async fn execute(&self) -> Result<Vec<BlobResponse>, BlobUseCaseError> {
        let blobs = self.blob_store.list(&self.container).await?;
        Ok(blobs.into_iter().map(BlobResponse::from).collect())
    }
}

/// Use case: Delete a blob from the catalog container (no-op when absent)
pub struct DeleteCatalogBlobUseCase {
    blob_store: Arc<dyn BlobStore>,
    container: ContainerName,
}

impl DeleteCatalogBlobUseCase {
    pub fn new(blob_store: Arc<dyn BlobStore>, container: ContainerName) -> Self {
        Self {
            blob_store,
            container,
        }
    }

    pub async fn execute(&self, blob_name: &str) -> Result<(), BlobUseCaseError> {
        let blob_name = BlobName::new(blob_name)?;

        let removed = self.blob_store.delete(&self.container, &blob_name).await?;
        tracing::info!(container = %self.container, blob_name = %blob_name, removed, "Catalog blob delete");
        Ok(())
    }
}

/// Use case: Open a stored blob from any configured container
pub struct ReadBlobUseCase {
    blob_store: Arc<dyn BlobStore>,
    containers: Vec<ContainerName>,
}

impl ReadBlobUseCase {
    pub fn new(blob_store: Arc<dyn BlobStore>, containers: Vec<ContainerName>) -> Self {
        Self {
            blob_store,
            containers,
        }
    }

    /// Returns the blob stream and its content type
    pub async fn execute(
        &self,
        container: &str,
        blob_name: &str,
    ) -> Result<(BlobReader, String), BlobUseCaseError> {
        let not_found = || BlobUseCaseError::NotFound(format!("{}/{}", container, blob_name));

        let container = self
            .containers
            .iter()
            .find(|c| c.as_str() == container)
            .ok_or_else(not_found)?;
        let name = BlobName::new(blob_name).map_err(|_| not_found())?;

        match self.blob_store.read(container, &name).await {
            Ok(blob) => Ok(blob),
            Err(StorageError::NotFound(_)) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
