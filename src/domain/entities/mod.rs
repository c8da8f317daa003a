mod catalog_image;
mod person;
mod product;

pub use catalog_image::CatalogImage;
pub use person::{NewPerson, Person, PersonUpdate};
pub use product::{Product, ProductMerge, ProductUpdate};

use crate::domain::errors::DomainError;

/// Check a required free-text field: not blank and at most `max_chars` characters
fn required_text(field: &str, value: String, max_chars: usize) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation {
            field: field.to_string(),
            message: "is required".to_string(),
        });
    }

    let length = value.chars().count();
    if length > max_chars {
        return Err(DomainError::Validation {
            field: field.to_string(),
            message: format!("must be at most {} characters, got {}", max_chars, length),
        });
    }

    Ok(value)
}

/// A partial-update field counts as supplied when present and non-empty
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
