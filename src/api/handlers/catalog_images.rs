use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    response::Json,
};
use std::sync::Arc;

use super::multipart::MultipartForm;
use crate::api::errors::{ApiError, ErrorBody};
use crate::application::dto::{CatalogImageResponse, CreateCatalogImageRequest};
use crate::application::use_cases::{
    CreateCatalogImageUseCase, DeleteCatalogImageUseCase, ListAllCatalogImagesUseCase,
    ListCatalogImageByIdUseCase,
};

/// POST /api/catalogimage
/// Multipart form with a `file` part and a `productCategory` field
#[utoipa::path(
    post,
    path = "/api/catalogimage",
    tag = "catalog-images",
    request_body(content_type = "multipart/form-data", description = "`file` and `productCategory`"),
    responses(
        (status = 200, description = "Image stored", body = CatalogImageResponse),
        (status = 400, description = "Missing, empty or oversized file", body = ErrorBody)
    )
)]
pub async fn create_catalog_image_handler(
    State(use_case): State<Arc<CreateCatalogImageUseCase>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CatalogImageResponse>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;

    let request = CreateCatalogImageRequest {
        file: form.file.take(),
        product_category: form.fields.remove("productCategory"),
    };

    Ok(Json(use_case.execute(request).await?))
}

/// GET /api/catalogimage
#[utoipa::path(
    get,
    path = "/api/catalogimage",
    tag = "catalog-images",
    responses((status = 200, description = "All catalog images", body = [CatalogImageResponse]))
)]
pub async fn list_catalog_images_handler(
    State(use_case): State<Arc<ListAllCatalogImagesUseCase>>,
) -> Result<Json<Vec<CatalogImageResponse>>, ApiError> {
    Ok(Json(use_case.execute().await?))
}

/// GET /api/catalogimage/{id}
#[utoipa::path(
    get,
    path = "/api/catalogimage/{id}",
    tag = "catalog-images",
    params(("id" = String, Path, description = "Catalog image id (UUID)")),
    responses(
        (status = 200, description = "Catalog image", body = CatalogImageResponse),
        (status = 404, description = "No such image", body = ErrorBody)
    )
)]
pub async fn get_catalog_image_handler(
    State(use_case): State<Arc<ListCatalogImageByIdUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<CatalogImageResponse>, ApiError> {
    Ok(Json(use_case.execute(&id).await?))
}

/// DELETE /api/catalogimage/{id}
/// Removes the blob, then the record
#[utoipa::path(
    delete,
    path = "/api/catalogimage/{id}",
    tag = "catalog-images",
    params(("id" = String, Path, description = "Catalog image id (UUID)")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such image", body = ErrorBody)
    )
)]
pub async fn delete_catalog_image_handler(
    State(use_case): State<Arc<DeleteCatalogImageUseCase>>,
    Path(id): Path<String>,
) -> Result<(), ApiError> {
    use_case.execute(&id).await?;
    Ok(())
}
