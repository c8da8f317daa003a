use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

static CONTAINER_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?$").expect("Invalid container name regex")
});

/// Validated blob container name (normalized to lowercase)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerName(String);

impl ContainerName {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 63;

    pub fn new(value: &str) -> Result<Self, DomainError> {
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::InvalidContainerName(
                "Container name is required".to_string(),
            ));
        }

        if normalized.len() < Self::MIN_LENGTH
            || normalized.len() > Self::MAX_LENGTH
            || !CONTAINER_NAME_REGEX.is_match(&normalized)
        {
            return Err(DomainError::InvalidContainerName(format!(
                "'{}' must be 3-63 lowercase letters, digits or inner hyphens",
                normalized
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContainerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContainerName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A container together with the largest blob it accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDefinition {
    name: ContainerName,
    max_size_bytes: u64,
}

impl ContainerDefinition {
    pub fn new(name: ContainerName, max_size_bytes: u64) -> Result<Self, DomainError> {
        if max_size_bytes == 0 {
            return Err(DomainError::Validation {
                field: "max_size".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(Self {
            name,
            max_size_bytes,
        })
    }

    /// Build from a size configured in kilobytes
    pub fn from_kb(name: ContainerName, max_size_kb: i64) -> Result<Self, DomainError> {
        if max_size_kb <= 0 {
            return Err(DomainError::Validation {
                field: "max_size_kb".to_string(),
                message: format!("must be a positive integer (KB), got {}", max_size_kb),
            });
        }

        let max_size_bytes = (max_size_kb as u64)
            .checked_mul(1024)
            .ok_or_else(|| DomainError::Validation {
                field: "max_size_kb".to_string(),
                message: "overflows when converted to bytes".to_string(),
            })?;

        Self::new(name, max_size_bytes)
    }

    pub fn name(&self) -> &ContainerName {
        &self.name
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Reject content that is empty or larger than this container allows
    pub fn check_size(&self, size_bytes: u64) -> Result<(), DomainError> {
        if size_bytes == 0 {
            return Err(DomainError::EmptyFile);
        }
        if size_bytes > self.max_size_bytes {
            return Err(DomainError::FileTooLarge {
                size_bytes,
                max_bytes: self.max_size_bytes,
            });
        }
        Ok(())
    }
}
