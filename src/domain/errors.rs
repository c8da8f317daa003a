use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid blob name: {0}")]
    InvalidBlobName(String),

    #[error("Invalid container name: {0}")]
    InvalidContainerName(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Validation error in field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("File cannot be empty")]
    EmptyFile,

    #[error(
        "File exceeds the maximum allowed size of {} KB. Current size: {} KB.",
        .max_bytes / 1024,
        .size_bytes / 1024
    )]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message_reports_kilobytes() {
        let err = DomainError::FileTooLarge {
            size_bytes: 3 * 1024 + 10,
            max_bytes: 2 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "File exceeds the maximum allowed size of 2 KB. Current size: 3 KB."
        );
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = DomainError::Validation {
            field: "name".to_string(),
            message: "too long".to_string(),
        };
        assert!(err.to_string().contains("'name'"));
        assert!(err.to_string().contains("too long"));
    }
}
