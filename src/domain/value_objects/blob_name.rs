use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Name of a blob inside a container.
///
/// Restricted to `[A-Za-z0-9._-]` so a name is safe both as a single path
/// segment on disk and inside a URL without encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlobName(String);

impl BlobName {
    pub const MAX_LENGTH: usize = 1024;
    const MAX_FILE_NAME_LENGTH: usize = 255;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::InvalidBlobName(
                "Blob name is required".to_string(),
            ));
        }

        if value.len() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidBlobName(format!(
                "Blob name too long: {} > {}",
                value.len(),
                Self::MAX_LENGTH
            )));
        }

        if value.starts_with('.') {
            return Err(DomainError::InvalidBlobName(
                "Blob name cannot start with '.'".to_string(),
            ));
        }

        if !value.chars().all(Self::is_allowed_char) {
            return Err(DomainError::InvalidBlobName(
                "Blob name must contain only letters, digits, '.', '_' or '-'".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// Build the stored name for an uploaded file: `"{prefix}-{file_name}"`.
    ///
    /// The client-supplied file name is reduced to its last path component
    /// and any character outside the allowed set becomes `_`.
    pub fn for_upload(prefix: Uuid, file_name: &str) -> Self {
        let base = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();

        let mut sanitized: String = base
            .chars()
            .map(|c| if Self::is_allowed_char(c) { c } else { '_' })
            .take(Self::MAX_FILE_NAME_LENGTH)
            .collect();

        if sanitized.trim_matches('.').is_empty() {
            sanitized = "file".to_string();
        }

        Self(format!("{}-{}", prefix, sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
    }
}

impl std::fmt::Display for BlobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BlobName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BlobName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BlobName> for String {
    fn from(name: BlobName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_name_accepts_plain_names() {
        assert!(BlobName::new("photo.png").is_ok());
        assert!(BlobName::new("a-b_c.1").is_ok());
    }

    #[test]
    fn test_blob_name_rejects_traversal_and_separators() {
        assert!(BlobName::new("").is_err());
        assert!(BlobName::new("..").is_err());
        assert!(BlobName::new(".hidden").is_err());
        assert!(BlobName::new("dir/file").is_err());
        assert!(BlobName::new("dir\\file").is_err());
        assert!(BlobName::new("with space").is_err());
    }

    #[test]
    fn test_for_upload_prefixes_and_sanitizes() {
        let prefix = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();

        let name = BlobName::for_upload(prefix, "C:\\Users\\me\\My Photo.png");
        assert_eq!(
            name.as_str(),
            "550e8400-e29b-41d4-a716-446655440000-My_Photo.png"
        );

        let name = BlobName::for_upload(prefix, "../..");
        assert_eq!(name.as_str(), "550e8400-e29b-41d4-a716-446655440000-file");
    }

    #[test]
    fn test_for_upload_result_is_a_valid_name() {
        let name = BlobName::for_upload(Uuid::new_v4(), "résumé final (2).pdf");
        assert!(BlobName::new(name.as_str()).is_ok());
    }
}
