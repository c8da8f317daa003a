use std::any::Any;

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::api::errors::ApiError;

/// Error handling utilities
pub struct ErrorUtils;

impl ErrorUtils {
    pub fn log_error(status: StatusCode, uri: &Uri, method: &Method) {
        if status.is_server_error() {
            error!("Server error: {} {} -> {}", method, uri, status);
        } else if status.is_client_error() {
            warn!("Client error: {} {} -> {}", method, uri, status);
        }
    }
}

/// Handler for `CatchPanicLayer::custom`
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::internal_error(format!("Handler panicked: {}", detail)).into_response()
}

/// Map a database error to a message safe to show to operators and health checks
pub fn sanitize_db_error(error: &sqlx::Error) -> String {
    match error {
        sqlx::Error::Configuration(_) => "Database configuration error".to_string(),
        sqlx::Error::Database(db_err) => match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => "Unique constraint violation".to_string(),
            sqlx::error::ErrorKind::NotNullViolation => "Required field is missing".to_string(),
            sqlx::error::ErrorKind::CheckViolation => "Data validation failed".to_string(),
            _ => "Database operation error".to_string(),
        },
        sqlx::Error::Io(_) => "Database connection error".to_string(),
        sqlx::Error::Tls(_) => "Database TLS error".to_string(),
        sqlx::Error::PoolTimedOut => "Database pool timeout".to_string(),
        sqlx::Error::PoolClosed => "Database pool closed".to_string(),
        sqlx::Error::RowNotFound => "Record not found".to_string(),
        _ => "Database error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_response_is_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_db_error_sanitization() {
        let config_err = sqlx::Error::Configuration("host=localhost password=secret".into());
        assert_eq!(sanitize_db_error(&config_err), "Database configuration error");

        let io_err = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(sanitize_db_error(&io_err), "Database connection error");

        assert_eq!(sanitize_db_error(&sqlx::Error::PoolTimedOut), "Database pool timeout");
        assert_eq!(sanitize_db_error(&sqlx::Error::PoolClosed), "Database pool closed");
    }
}
