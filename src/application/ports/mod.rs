mod blob_store;
mod catalog_image_repository;
mod person_repository;
mod product_repository;

pub use blob_store::{BlobReader, BlobStore, StorageError, StoredBlob};
pub use catalog_image_repository::CatalogImageRepository;
pub use person_repository::PersonRepository;
pub use product_repository::{ProductRepository, RepositoryError};

#[cfg(test)]
pub use blob_store::MockBlobStore;
#[cfg(test)]
pub use catalog_image_repository::MockCatalogImageRepository;
#[cfg(test)]
pub use person_repository::MockPersonRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
