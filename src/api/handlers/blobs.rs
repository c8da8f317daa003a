use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::{ApiError, ErrorBody};
use crate::application::use_cases::ReadBlobUseCase;

/// GET /blobs/{container}/{blobName}
/// Streams a stored blob so blob URLs resolve
#[utoipa::path(
    get,
    path = "/blobs/{container}/{blobName}",
    tag = "blobs",
    params(
        ("container" = String, Path, description = "Container name"),
        ("blobName" = String, Path, description = "Stored blob name")
    ),
    responses(
        (status = 200, description = "Blob content"),
        (status = 404, description = "No such blob", body = ErrorBody)
    )
)]
pub async fn read_blob_handler(
    State(use_case): State<Arc<ReadBlobUseCase>>,
    Path((container, blob_name)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let (reader, content_type) = use_case.execute(&container, &blob_name).await?;

    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(body)
        .map_err(|e| ApiError::internal_error(format!("Failed to build response: {}", e)))
}
