use axum::http::Uri;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{BlobName, ContainerName};

/// Absolute base URL under which stored blobs are reachable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicBaseUrl(String);

impl PublicBaseUrl {
    pub fn new(value: &str, require_https: bool) -> Result<Self, DomainError> {
        let normalized = value.trim();

        if normalized.is_empty() {
            return Err(DomainError::InvalidUri(
                "value is missing or not configured".to_string(),
            ));
        }

        let uri: Uri = normalized
            .parse()
            .map_err(|e| DomainError::InvalidUri(format!("{}: {}", normalized, e)))?;

        let scheme = uri
            .scheme_str()
            .ok_or_else(|| DomainError::InvalidUri("must be an absolute URI".to_string()))?;

        if uri.authority().is_none() {
            return Err(DomainError::InvalidUri(
                "must be an absolute URI".to_string(),
            ));
        }

        match scheme.to_ascii_lowercase().as_str() {
            "https" => {}
            "http" if !require_https => {}
            "http" => {
                return Err(DomainError::InvalidUri("must use HTTPS".to_string()));
            }
            other => {
                return Err(DomainError::InvalidUri(format!(
                    "unsupported scheme '{}'",
                    other
                )));
            }
        }

        if uri.query().is_some() {
            return Err(DomainError::InvalidUri(
                "must not contain a query string".to_string(),
            ));
        }

        Ok(Self(normalized.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn blob_url(&self, container: &ContainerName, blob_name: &BlobName) -> String {
        format!("{}/{}/{}", self.0, container, blob_name)
    }
}

impl std::fmt::Display for PublicBaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
