use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::errors::ErrorBody;
use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    BlobResponse, CatalogImageResponse, CreatePersonRequest, CreateProductRequest,
    PersonResponse, ProductResponse, UpdatePersonRequest, UpdateProductRequest,
};

/// OpenAPI document for the catalog service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Service API",
        version = "1.0.0",
        description = "Products partitioned by category, catalog images and blobs, and people"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::products::create_product_handler,
        crate::api::handlers::products::list_products_handler,
        crate::api::handlers::products::get_product_handler,
        crate::api::handlers::products::update_product_handler,
        crate::api::handlers::products::delete_product_handler,
        crate::api::handlers::catalog_images::create_catalog_image_handler,
        crate::api::handlers::catalog_images::list_catalog_images_handler,
        crate::api::handlers::catalog_images::get_catalog_image_handler,
        crate::api::handlers::catalog_images::delete_catalog_image_handler,
        crate::api::handlers::catalog::upload_catalog_blob_handler,
        crate::api::handlers::catalog::list_catalog_blobs_handler,
        crate::api::handlers::catalog::delete_catalog_blob_handler,
        crate::api::handlers::blobs::read_blob_handler,
        crate::api::handlers::people::create_person_handler,
        crate::api::handlers::people::list_people_handler,
        crate::api::handlers::people::get_person_handler,
        crate::api::handlers::people::update_person_handler,
        crate::api::handlers::people::delete_person_handler,
    ),
    components(
        schemas(
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            CatalogImageResponse,
            BlobResponse,
            CreatePersonRequest,
            UpdatePersonRequest,
            PersonResponse,
            ErrorBody,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "products", description = "Products partitioned by category"),
        (name = "catalog-images", description = "Product images backed by blob storage"),
        (name = "catalog", description = "Raw blobs in the catalog container"),
        (name = "blobs", description = "Blob downloads"),
        (name = "people", description = "People directory")
    )
)]
pub struct ApiDoc;

/// Swagger UI plus the generated document
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
