//! Shared input checks for use cases

use validator::Validate;

use crate::application::dto::FileUpload;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ContainerDefinition;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Run `validator` rules and report the first failing field
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), DomainError> {
    payload.validate().map_err(|validation_errors| {
        let mut field_errors: Vec<_> = validation_errors.field_errors().into_iter().collect();
        field_errors.sort_by(|a, b| a.0.cmp(&b.0));

        field_errors
            .into_iter()
            .find_map(|(field, errors)| {
                errors.first().map(|error| DomainError::Validation {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .unwrap_or_else(|| DomainError::Validation {
                field: "body".to_string(),
                message: validation_errors.to_string(),
            })
    })
}

/// Require a file part and check it against the target container's limits
pub fn validate_file<'a>(
    file: Option<&'a FileUpload>,
    container: &ContainerDefinition,
) -> Result<&'a FileUpload, DomainError> {
    let file = file.ok_or_else(|| DomainError::Validation {
        field: "file".to_string(),
        message: "File is required".to_string(),
    })?;

    container.check_size(file.size_bytes())?;
    Ok(file)
}

/// Stored content type: the client's value, or octet-stream when absent or blank
pub fn content_type_or_default(content_type: Option<&str>) -> String {
    content_type
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::CreateProductRequest;
    use crate::domain::value_objects::ContainerName;
    use bytes::Bytes;

    fn container(max_bytes: u64) -> ContainerDefinition {
        ContainerDefinition::new(ContainerName::new("catalog").unwrap(), max_bytes).unwrap()
    }

    fn upload(content: &'static [u8]) -> FileUpload {
        FileUpload {
            file_name: "a.txt".to_string(),
            content_type: None,
            content: Bytes::from_static(content),
        }
    }

    #[test]
    fn test_validate_payload_reports_field() {
        let request = CreateProductRequest {
            category: "shoes".to_string(),
            name: String::new(),
            price: 1.0,
            description: "d".to_string(),
        };

        let err = validate_payload(&request).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_validate_file_requires_file() {
        let err = validate_file(None, &container(10)).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "file"));
    }

    #[test]
    fn test_validate_file_checks_size() {
        assert_eq!(
            validate_file(Some(&upload(b"")), &container(10)).unwrap_err(),
            DomainError::EmptyFile
        );
        assert!(matches!(
            validate_file(Some(&upload(b"0123456789x")), &container(10)).unwrap_err(),
            DomainError::FileTooLarge { .. }
        ));
        assert!(validate_file(Some(&upload(b"ok")), &container(10)).is_ok());
    }

    #[test]
    fn test_content_type_defaults() {
        assert_eq!(content_type_or_default(None), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_or_default(Some("  ")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_or_default(Some("image/png")), "image/png");
    }
}
