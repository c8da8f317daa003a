use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::value_objects::{BlobName, ContainerName};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Type alias for async reader
pub type BlobReader = Pin<Box<dyn AsyncRead + Send>>;

/// A blob as it sits in a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub name: BlobName,
    pub url: String,
    pub size_bytes: u64,
    pub content_type: String,
}

/// Port for named blob storage grouped in containers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write the reader to `container/name`, replacing any existing blob
    async fn upload(
        &self,
        container: &ContainerName,
        name: &BlobName,
        reader: BlobReader,
        content_type: &str,
    ) -> Result<StoredBlob, StorageError>;

    async fn list(&self, container: &ContainerName) -> Result<Vec<StoredBlob>, StorageError>;

    /// Open a blob for streaming together with its stored content type
    async fn read(
        &self,
        container: &ContainerName,
        name: &BlobName,
    ) -> Result<(BlobReader, String), StorageError>;

    /// Delete if present; returns whether a blob was removed
    async fn delete(&self, container: &ContainerName, name: &BlobName)
        -> Result<bool, StorageError>;
}
