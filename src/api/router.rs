use axum::{
    extract::DefaultBodyLimit,
    http::{Method, Uri},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::api::errors::ApiError;
use crate::api::handlers::{
    create_catalog_image_handler, create_person_handler, create_product_handler,
    delete_catalog_blob_handler, delete_catalog_image_handler, delete_person_handler,
    delete_product_handler, get_catalog_image_handler, get_person_handler, get_product_handler,
    health_handler, list_catalog_blobs_handler, list_catalog_images_handler, list_people_handler,
    list_products_handler, read_blob_handler, readiness_handler, update_person_handler,
    update_product_handler, upload_catalog_blob_handler,
};
use crate::api::middleware::{
    create_cors_layer_for_environment, create_error_handling_middleware, panic_response,
};
use crate::api::openapi::swagger_ui;
use crate::application::use_cases::{
    CreateCatalogImageUseCase, CreatePersonUseCase, CreateProductUseCase,
    DeleteCatalogBlobUseCase, DeleteCatalogImageUseCase, DeletePersonUseCase,
    DeleteProductUseCase, ListAllCatalogImagesUseCase, ListAllPeopleUseCase,
    ListAllProductsUseCase, ListCatalogBlobsUseCase, ListCatalogImageByIdUseCase,
    ListPersonByIdUseCase, ListProductByIdUseCase, ReadBlobUseCase, UpdatePersonUseCase,
    UpdateProductUseCase, UploadCatalogBlobUseCase,
};
use crate::config::Config;

/// Application state container
pub struct AppState {
    /// Present only with the Postgres backend
    pub pool: Option<Arc<PgPool>>,
    pub config: Arc<Config>,
    // Products
    pub create_product: Arc<CreateProductUseCase>,
    pub list_products: Arc<ListAllProductsUseCase>,
    pub get_product: Arc<ListProductByIdUseCase>,
    pub update_product: Arc<UpdateProductUseCase>,
    pub delete_product: Arc<DeleteProductUseCase>,
    // Catalog images
    pub create_catalog_image: Arc<CreateCatalogImageUseCase>,
    pub list_catalog_images: Arc<ListAllCatalogImagesUseCase>,
    pub get_catalog_image: Arc<ListCatalogImageByIdUseCase>,
    pub delete_catalog_image: Arc<DeleteCatalogImageUseCase>,
    // Catalog blobs
    pub upload_catalog_blob: Arc<UploadCatalogBlobUseCase>,
    pub list_catalog_blobs: Arc<ListCatalogBlobsUseCase>,
    pub delete_catalog_blob: Arc<DeleteCatalogBlobUseCase>,
    pub read_blob: Arc<ReadBlobUseCase>,
    // People
    pub create_person: Arc<CreatePersonUseCase>,
    pub list_people: Arc<ListAllPeopleUseCase>,
    pub get_person: Arc<ListPersonByIdUseCase>,
    pub update_person: Arc<UpdatePersonUseCase>,
    pub delete_person: Arc<DeletePersonUseCase>,
}

async fn fallback_handler(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {} {}", method, uri.path()))
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let AppState {
        pool,
        config,
        create_product,
        list_products,
        get_product,
        update_product,
        delete_product,
        create_catalog_image,
        list_catalog_images,
        get_catalog_image,
        delete_catalog_image,
        upload_catalog_blob,
        list_catalog_blobs,
        delete_catalog_blob,
        read_blob,
        create_person,
        list_people,
        get_person,
        update_person,
        delete_person,
    } = state;

    Router::new()
        // Health
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler).with_state(pool))
        // Products
        .route(
            "/api/products",
            post(create_product_handler)
                .with_state(create_product)
                .merge(get(list_products_handler).with_state(list_products)),
        )
        .route(
            "/api/products/{id}",
            get(get_product_handler)
                .with_state(get_product)
                .merge(put(update_product_handler).with_state(update_product))
                .merge(delete(delete_product_handler).with_state(delete_product)),
        )
        // Catalog images
        .route(
            "/api/catalogimage",
            post(create_catalog_image_handler)
                .with_state(create_catalog_image)
                .merge(get(list_catalog_images_handler).with_state(list_catalog_images)),
        )
        .route(
            "/api/catalogimage/{id}",
            get(get_catalog_image_handler)
                .with_state(get_catalog_image)
                .merge(delete(delete_catalog_image_handler).with_state(delete_catalog_image)),
        )
        // Catalog blobs
        .route(
            "/api/catalog",
            post(upload_catalog_blob_handler)
                .with_state(upload_catalog_blob)
                .merge(get(list_catalog_blobs_handler).with_state(list_catalog_blobs)),
        )
        .route(
            "/api/catalog/{blob_name}",
            delete(delete_catalog_blob_handler).with_state(delete_catalog_blob),
        )
        .route(
            "/blobs/{container}/{blob_name}",
            get(read_blob_handler).with_state(read_blob),
        )
        // People
        .route(
            "/api/people",
            post(create_person_handler)
                .with_state(create_person)
                .merge(get(list_people_handler).with_state(list_people)),
        )
        .route(
            "/api/people/{id}",
            get(get_person_handler)
                .with_state(get_person)
                .merge(put(update_person_handler).with_state(update_person))
                .merge(delete(delete_person_handler).with_state(delete_person)),
        )
        .merge(swagger_ui())
        .fallback(fallback_handler)
        // Innermost first
        .layer(DefaultBodyLimit::max(config.max_body_bytes()))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(create_error_handling_middleware())
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer_for_environment(
            &config.environment,
            &config.allowed_origins,
        ))
}
