use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{BlobReader, BlobStore, StorageError, StoredBlob};
use crate::application::validation::DEFAULT_CONTENT_TYPE;
use crate::domain::value_objects::{BlobName, ContainerName, PublicBaseUrl};

use super::PathBuilder;

/// Local filesystem blob store with one directory per container
pub struct LocalFilesystemStore {
    path_builder: PathBuilder,
    public_base_url: PublicBaseUrl,
    durable_writes: bool,
}

impl LocalFilesystemStore {
    pub fn new(root: PathBuf, public_base_url: PublicBaseUrl) -> Self {
        Self::with_durability(root, public_base_url, true)
    }

    /// `durable_writes` fsyncs blob files and their directory after each upload
    pub fn with_durability(root: PathBuf, public_base_url: PublicBaseUrl, durable_writes: bool) -> Self {
        Self {
            path_builder: PathBuilder::new(root),
            public_base_url,
            durable_writes,
        }
    }

    /// Create the directory tree for every container
    pub async fn init(&self, containers: &[ContainerName]) -> Result<(), StorageError> {
        for container in containers {
            self.ensure_container(container).await?;
        }
        debug!(root = ?self.path_builder.root(), "Blob store initialized");
        Ok(())
    }

    async fn ensure_container(&self, container: &ContainerName) -> Result<(), StorageError> {
        fs::create_dir_all(self.path_builder.meta_dir(container)).await?;
        fs::create_dir_all(self.path_builder.temp_dir(container)).await?;
        Ok(())
    }

    async fn content_type_of(&self, container: &ContainerName, name: &BlobName) -> String {
        match fs::read_to_string(self.path_builder.meta_path(container, name)).await {
            Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    fn stored_blob(
        &self,
        container: &ContainerName,
        name: BlobName,
        size_bytes: u64,
        content_type: String,
    ) -> StoredBlob {
        StoredBlob {
            url: self.public_base_url.blob_url(container, &name),
            name,
            size_bytes,
            content_type,
        }
    }

    async fn write_temp(&self, temp_path: &Path, mut reader: BlobReader) -> Result<u64, StorageError> {
        let mut file = File::create(temp_path).await?;
        let size_bytes = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;
        if self.durable_writes {
            file.sync_all().await?;
        }
        Ok(size_bytes)
    }

    /// Put back the sidecar an aborted upload replaced, or drop the new one
    async fn restore_meta(&self, meta_path: &Path, previous: Option<String>) {
        let result = match previous {
            Some(content_type) => fs::write(meta_path, content_type).await,
            None => match fs::remove_file(meta_path).await {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            warn!("Failed to restore content type sidecar {:?}: {}", meta_path, e);
        }
    }

    async fn sync_dir(&self, dir: &Path) {
        if !self.durable_writes {
            return;
        }
        match File::open(dir).await {
            Ok(dir_file) => {
                if let Err(e) = dir_file.sync_all().await {
                    warn!("Failed to sync directory after rename: {}", e);
                }
            }
            Err(e) => warn!("Failed to open directory for sync: {}", e),
        }
    }
}

fn not_found_or_io(e: std::io::Error, what: impl FnOnce() -> String) -> StorageError {
    if e.kind() == ErrorKind::NotFound {
        StorageError::NotFound(what())
    } else {
        StorageError::Io(e)
    }
}

#[async_trait]
impl BlobStore for LocalFilesystemStore {
    async fn upload(
        &self,
        container: &ContainerName,
        name: &BlobName,
        reader: BlobReader,
        content_type: &str,
    ) -> Result<StoredBlob, StorageError> {
        self.ensure_container(container).await?;

        // 1. Stream into a temp file in the same container directory
        let temp_path = self.path_builder.temp_path(container, Uuid::new_v4());
        debug!("Writing blob to temp file: {:?}", temp_path);
        let size_bytes = match self.write_temp(&temp_path, reader).await {
            Ok(size) => size,
            Err(e) => {
                warn!("Failed to write blob to temp file {:?}: {}", temp_path, e);
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        // 2. Content type sidecar first, so a visible blob always has one
        let meta_path = self.path_builder.meta_path(container, name);
        let previous_meta = fs::read_to_string(&meta_path).await.ok();
        if let Err(e) = fs::write(&meta_path, content_type).await {
            warn!("Failed to write content type sidecar {:?}: {}", meta_path, e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        // 3. Atomic rename into place, replacing any previous blob
        let final_path = self.path_builder.blob_path(container, name);
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            warn!("Failed to move blob into place {:?}: {}", final_path, e);
            let _ = fs::remove_file(&temp_path).await;
            self.restore_meta(&meta_path, previous_meta).await;
            return Err(StorageError::Io(e));
        }
        self.sync_dir(&self.path_builder.container_dir(container)).await;

        debug!(%container, blob_name = %name, size_bytes, "Blob stored");
        Ok(self.stored_blob(container, name.clone(), size_bytes, content_type.to_string()))
    }

    async fn list(&self, container: &ContainerName) -> Result<Vec<StoredBlob>, StorageError> {
        let mut entries = match fs::read_dir(self.path_builder.container_dir(container)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        let mut blobs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            // Skips .meta/.tmp and anything not written through this store
            let Ok(name) = BlobName::new(file_name) else {
                continue;
            };
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let content_type = self.content_type_of(container, &name).await;
            blobs.push(self.stored_blob(container, name, metadata.len(), content_type));
        }

        blobs.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(blobs)
    }

    async fn read(
        &self,
        container: &ContainerName,
        name: &BlobName,
    ) -> Result<(BlobReader, String), StorageError> {
        let path = self.path_builder.blob_path(container, name);

        let file = File::open(&path)
            .await
            .map_err(|e| not_found_or_io(e, || format!("{}/{}", container, name)))?;
        let content_type = self.content_type_of(container, name).await;

        Ok((Box::pin(BufReader::new(file)), content_type))
    }

    async fn delete(&self, container: &ContainerName, name: &BlobName) -> Result<bool, StorageError> {
        let removed = match fs::remove_file(self.path_builder.blob_path(container, name)).await {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(StorageError::Io(e)),
        };

        match fs::remove_file(self.path_builder.meta_path(container, name)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(%container, blob_name = %name, "Failed to remove content type sidecar: {}", e),
        }

        Ok(removed)
    }
}
