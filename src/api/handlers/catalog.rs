use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use super::multipart::MultipartForm;
use crate::api::errors::{ApiError, ErrorBody};
use crate::application::dto::BlobResponse;
use crate::application::use_cases::{
    DeleteCatalogBlobUseCase, ListCatalogBlobsUseCase, UploadCatalogBlobUseCase,
};

/// POST /api/catalog
#[utoipa::path(
    post,
    path = "/api/catalog",
    tag = "catalog",
    request_body(content_type = "multipart/form-data", description = "`file` part"),
    responses(
        (status = 200, description = "Blob stored", body = BlobResponse),
        (status = 400, description = "Missing, empty or oversized file", body = ErrorBody)
    )
)]
pub async fn upload_catalog_blob_handler(
    State(use_case): State<Arc<UploadCatalogBlobUseCase>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BlobResponse>, ApiError> {
    let form = MultipartForm::read(multipart).await?;
    Ok(Json(use_case.execute(form.file).await?))
}

/// GET /api/catalog
#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "catalog",
    responses((status = 200, description = "Blobs in the catalog container", body = [BlobResponse]))
)]
pub async fn list_catalog_blobs_handler(
    State(use_case): State<Arc<ListCatalogBlobsUseCase>>,
) -> Result<Json<Vec<BlobResponse>>, ApiError> {
    Ok(Json(use_case.execute().await?))
}

/// DELETE /api/catalog/{blobName}
#[utoipa::path(
    delete,
    path = "/api/catalog/{blobName}",
    tag = "catalog",
    params(("blobName" = String, Path, description = "Stored blob name")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 400, description = "Invalid blob name", body = ErrorBody)
    )
)]
pub async fn delete_catalog_blob_handler(
    State(use_case): State<Arc<DeleteCatalogBlobUseCase>>,
    Path(blob_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    use_case.execute(&blob_name).await?;
    Ok(StatusCode::NO_CONTENT)
}
