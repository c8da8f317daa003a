use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use crate::api::router::AppState;
use crate::application::{
    ports::{BlobStore, CatalogImageRepository, PersonRepository, ProductRepository},
    use_cases::{
        CreateCatalogImageUseCase, CreatePersonUseCase, CreateProductUseCase,
        DeleteCatalogBlobUseCase, DeleteCatalogImageUseCase, DeletePersonUseCase,
        DeleteProductUseCase, ListAllCatalogImagesUseCase, ListAllPeopleUseCase,
        ListAllProductsUseCase, ListCatalogBlobsUseCase, ListCatalogImageByIdUseCase,
        ListPersonByIdUseCase, ListProductByIdUseCase, ReadBlobUseCase, UpdatePersonUseCase,
        UpdateProductUseCase, UploadCatalogBlobUseCase,
    },
};
use crate::config::{Config, PersistenceBackend};
use crate::infrastructure::{
    persistence::{
        InMemoryCatalogImageRepository, InMemoryPersonRepository, InMemoryProductRepository,
        PostgresCatalogImageRepository, PostgresPersonRepository, PostgresProductRepository,
    },
    storage::LocalFilesystemStore,
};

pub type BuildError = Box<dyn std::error::Error + Send + Sync>;

const CONNECT_RETRIES: u32 = 3;

/// Wires configuration, adapters and use cases into an [`AppState`]
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<PgPool>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    catalog_image_repo: Option<Arc<dyn CatalogImageRepository>>,
    person_repo: Option<Arc<dyn PersonRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            product_repo: None,
            catalog_image_repo: None,
            person_repo: None,
            blob_store: None,
        }
    }

    /// Connect and migrate when the Postgres backend is selected
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        if self.config.persistence_backend != PersistenceBackend::Postgres {
            info!("In-memory persistence selected, skipping database setup");
            return Ok(self);
        }

        info!(
            database_url = %self.config.database_url.redacted(),
            "Connecting to database"
        );

        let mut retries = CONNECT_RETRIES;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(self.config.database_url.expose())
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    warn!(
                        retry_in = ?delay,
                        retries_left = retries,
                        error = %e,
                        "Database connection failed"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to connect to database after retries");
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            max = self.config.db_max_connections,
            min = self.config.db_min_connections,
            "Database pool configured"
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            e
        })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Repositories for the selected backend plus the blob store
    pub async fn with_infrastructure(mut self) -> Result<Self, BuildError> {
        match self.config.persistence_backend {
            PersistenceBackend::Postgres => {
                let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;
                self.product_repo = Some(Arc::new(PostgresProductRepository::new(pool.clone())));
                self.catalog_image_repo =
                    Some(Arc::new(PostgresCatalogImageRepository::new(pool.clone())));
                self.person_repo = Some(Arc::new(PostgresPersonRepository::new(pool.clone())));
            }
            PersistenceBackend::Memory => {
                self.product_repo = Some(Arc::new(InMemoryProductRepository::new()));
                self.catalog_image_repo = Some(Arc::new(InMemoryCatalogImageRepository::new()));
                self.person_repo = Some(Arc::new(InMemoryPersonRepository::new()));
            }
        }

        let blob_store = LocalFilesystemStore::new(
            self.config.blob_storage_root.clone(),
            self.config.public_base_url.clone(),
        );
        let containers: Vec<_> = self
            .config
            .containers()
            .iter()
            .map(|c| c.name().clone())
            .collect();
        blob_store.init(&containers).await?;
        self.blob_store = Some(Arc::new(blob_store));

        info!(
            backend = ?self.config.persistence_backend,
            blob_root = ?self.config.blob_storage_root,
            "Infrastructure layer initialized"
        );
        Ok(self)
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let products = self.product_repo.ok_or("Product repository not initialized")?;
        let images = self
            .catalog_image_repo
            .ok_or("Catalog image repository not initialized")?;
        let people = self.person_repo.ok_or("Person repository not initialized")?;
        let blobs = self.blob_store.ok_or("Blob store not initialized")?;

        let config = self.config;
        let catalog = config.catalog_container.clone();
        let catalog_images = config.catalog_images_container.clone();
        let readable: Vec<_> = config
            .containers()
            .iter()
            .map(|c| c.name().clone())
            .collect();

        let state = AppState {
            pool: self.pool.map(Arc::new),
            create_product: Arc::new(CreateProductUseCase::new(Arc::clone(&products))),
            list_products: Arc::new(ListAllProductsUseCase::new(Arc::clone(&products))),
            get_product: Arc::new(ListProductByIdUseCase::new(Arc::clone(&products))),
            update_product: Arc::new(UpdateProductUseCase::new(
                Arc::clone(&products),
                config.rekey_policy(),
            )),
            delete_product: Arc::new(DeleteProductUseCase::new(products)),
            create_catalog_image: Arc::new(CreateCatalogImageUseCase::new(
                Arc::clone(&images),
                Arc::clone(&blobs),
                catalog_images.clone(),
            )),
            list_catalog_images: Arc::new(ListAllCatalogImagesUseCase::new(Arc::clone(&images))),
            get_catalog_image: Arc::new(ListCatalogImageByIdUseCase::new(Arc::clone(&images))),
            delete_catalog_image: Arc::new(DeleteCatalogImageUseCase::new(
                images,
                Arc::clone(&blobs),
                catalog_images,
            )),
            upload_catalog_blob: Arc::new(UploadCatalogBlobUseCase::new(
                Arc::clone(&blobs),
                catalog.clone(),
            )),
            list_catalog_blobs: Arc::new(ListCatalogBlobsUseCase::new(
                Arc::clone(&blobs),
                catalog.name().clone(),
            )),
            delete_catalog_blob: Arc::new(DeleteCatalogBlobUseCase::new(
                Arc::clone(&blobs),
                catalog.name().clone(),
            )),
            read_blob: Arc::new(ReadBlobUseCase::new(blobs, readable)),
            create_person: Arc::new(CreatePersonUseCase::new(Arc::clone(&people))),
            list_people: Arc::new(ListAllPeopleUseCase::new(Arc::clone(&people))),
            get_person: Arc::new(ListPersonByIdUseCase::new(Arc::clone(&people))),
            update_person: Arc::new(UpdatePersonUseCase::new(Arc::clone(&people))),
            delete_person: Arc::new(DeletePersonUseCase::new(people)),
            config: Arc::new(config),
        };

        info!("Application layer initialized");
        Ok(state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config(root: &std::path::Path) -> Config {
        let root = root.to_string_lossy().to_string();
        Config::from_lookup(|key| match key {
            "PERSISTENCE_BACKEND" => Some("memory".to_string()),
            "BLOB_STORAGE_ROOT" => Some(root.clone()),
            _ => None,
        })
        .expect("valid config")
    }

    #[tokio::test]
    async fn test_memory_backend_builds_without_database() {
        let dir = tempfile::tempdir().unwrap();

        let state = ApplicationBuilder::new(memory_config(dir.path()))
            .with_database()
            .await
            .unwrap()
            .with_infrastructure()
            .await
            .unwrap()
            .build()
            .unwrap();

        assert!(state.pool.is_none());
        assert!(dir.path().join("catalog").is_dir());
        assert!(dir.path().join("catalog-images").is_dir());
        assert!(dir.path().join("invoices").is_dir());
    }

    #[test]
    fn test_build_without_infrastructure_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ApplicationBuilder::new(memory_config(dir.path())).build();

        assert!(result.is_err());
    }
}
