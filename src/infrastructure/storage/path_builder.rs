use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::value_objects::{BlobName, ContainerName};

/// Utility for generating storage paths.
///
/// Layout under the root:
/// - `{container}/{blob}` blob content
/// - `{container}/.meta/{blob}` stored content type
/// - `{container}/.tmp/{uuid}` in-flight uploads
///
/// Blob names never start with `.`, so the bookkeeping directories cannot
/// collide with a blob.
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn container_dir(&self, container: &ContainerName) -> PathBuf {
        self.root.join(container.as_str())
    }

    pub fn blob_path(&self, container: &ContainerName, name: &BlobName) -> PathBuf {
        self.container_dir(container).join(name.as_str())
    }

    pub fn meta_dir(&self, container: &ContainerName) -> PathBuf {
        self.container_dir(container).join(".meta")
    }

    pub fn meta_path(&self, container: &ContainerName, name: &BlobName) -> PathBuf {
        self.meta_dir(container).join(name.as_str())
    }

    pub fn temp_dir(&self, container: &ContainerName) -> PathBuf {
        self.container_dir(container).join(".tmp")
    }

    pub fn temp_path(&self, container: &ContainerName, id: Uuid) -> PathBuf {
        self.temp_dir(container).join(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_stay_inside_container() {
        let builder = PathBuilder::new(PathBuf::from("/data/blobs"));
        let container = ContainerName::new("catalog").unwrap();
        let name = BlobName::new("abc-photo.png").unwrap();

        assert_eq!(
            builder.blob_path(&container, &name),
            PathBuf::from("/data/blobs/catalog/abc-photo.png")
        );
        assert_eq!(
            builder.meta_path(&container, &name),
            PathBuf::from("/data/blobs/catalog/.meta/abc-photo.png")
        );
        assert!(builder
            .temp_path(&container, Uuid::nil())
            .starts_with("/data/blobs/catalog/.tmp"));
    }
}
