use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Partition key grouping products and catalog images (e.g. "shoes")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub const MAX_LENGTH: usize = 32;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::InvalidCategory(
                "Category cannot be empty".to_string(),
            ));
        }

        let length = value.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DomainError::InvalidCategory(format!(
                "Category too long: {} > {}",
                length,
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Category {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_accepts_valid_value() {
        let category = Category::new("shoes").unwrap();
        assert_eq!(category.as_str(), "shoes");
    }

    #[test]
    fn test_category_rejects_blank() {
        assert!(Category::new("").is_err());
        assert!(Category::new("   ").is_err());
    }

    #[test]
    fn test_category_length_limit_counts_chars() {
        assert!(Category::new("a".repeat(32)).is_ok());
        assert!(Category::new("a".repeat(33)).is_err());
        // 32 multi-byte characters are still within the limit
        assert!(Category::new("é".repeat(32)).is_ok());
    }

    #[test]
    fn test_category_deserialize_validates() {
        assert!(serde_json::from_str::<Category>("\"books\"").is_ok());
        assert!(serde_json::from_str::<Category>("\"\"").is_err());
    }
}
