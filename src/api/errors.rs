use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::errors::{
    BlobUseCaseError, CatalogImageUseCaseError, PersonUseCaseError, ProductUseCaseError,
};
use crate::application::ports::{RepositoryError, StorageError};

/// Message returned in place of any server-side error detail
pub const MASKED_SERVER_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// JSON error body shared by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code_for(status),
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

/// Response extension marking a body that is already an [`ErrorBody`]
#[derive(Debug, Clone, Copy)]
pub struct ErrorEnvelope;

/// `BAD_REQUEST`, `NOT_FOUND`, ... derived from the status reason phrase
pub fn error_code_for(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Error")
        .to_uppercase()
        .replace(['-', ' '], "_")
        .replace('\'', "")
}

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status, "Request failed: {}", self.message);
            MASKED_SERVER_ERROR.to_string()
        } else {
            self.message
        };

        let mut response = (self.status, Json(ErrorBody::new(self.status, message))).into_response();
        response.extensions_mut().insert(ErrorEnvelope);
        response
    }
}

fn from_repository(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::NotFound(msg) => ApiError::not_found(format!("Not found: {}", msg)),
        e => ApiError::internal_error(format!("Repository error: {}", e)),
    }
}

fn from_storage(err: StorageError) -> ApiError {
    match err {
        StorageError::NotFound(msg) => ApiError::not_found(format!("Blob not found: {}", msg)),
        e => ApiError::internal_error(format!("Storage error: {}", e)),
    }
}

// Convert use case errors to API errors

impl From<ProductUseCaseError> for ApiError {
    fn from(err: ProductUseCaseError) -> Self {
        match err {
            ProductUseCaseError::Domain(e) => ApiError::bad_request(e.to_string()),
            ProductUseCaseError::NotFound(id) => {
                ApiError::not_found(format!("Product not found: {}", id))
            }
            ProductUseCaseError::Repository(e) => from_repository(e),
            e @ ProductUseCaseError::RekeyIncomplete { .. } => {
                ApiError::internal_error(e.to_string())
            }
        }
    }
}

impl From<CatalogImageUseCaseError> for ApiError {
    fn from(err: CatalogImageUseCaseError) -> Self {
        match err {
            CatalogImageUseCaseError::Domain(e) => ApiError::bad_request(e.to_string()),
            CatalogImageUseCaseError::NotFound(id) => {
                ApiError::not_found(format!("Catalog image not found: {}", id))
            }
            CatalogImageUseCaseError::Repository(e) => from_repository(e),
            CatalogImageUseCaseError::Storage(e) => from_storage(e),
        }
    }
}

impl From<BlobUseCaseError> for ApiError {
    fn from(err: BlobUseCaseError) -> Self {
        match err {
            BlobUseCaseError::Domain(e) => ApiError::bad_request(e.to_string()),
            BlobUseCaseError::NotFound(name) => {
                ApiError::not_found(format!("Blob not found: {}", name))
            }
            BlobUseCaseError::Storage(e) => from_storage(e),
        }
    }
}

impl From<PersonUseCaseError> for ApiError {
    fn from(err: PersonUseCaseError) -> Self {
        match err {
            PersonUseCaseError::Domain(e) => ApiError::bad_request(e.to_string()),
            PersonUseCaseError::NotFound(id) => {
                ApiError::not_found(format!("Person not found: {}", id))
            }
            PersonUseCaseError::Repository(e) => from_repository(e),
        }
    }
}
