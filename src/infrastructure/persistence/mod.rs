mod in_memory;
mod postgres_catalog_image_repository;
mod postgres_person_repository;
mod postgres_product_repository;

pub use in_memory::{
    InMemoryCatalogImageRepository, InMemoryPersonRepository, InMemoryProductRepository,
};
pub use postgres_catalog_image_repository::PostgresCatalogImageRepository;
pub use postgres_person_repository::PostgresPersonRepository;
pub use postgres_product_repository::PostgresProductRepository;
