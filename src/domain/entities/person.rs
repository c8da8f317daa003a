use serde::{Deserialize, Serialize};

use super::{required_text, supplied};
use crate::domain::{errors::DomainError, value_objects::PersonId};

const NAME_MAX_LENGTH: usize = 100;

/// A person before the store has assigned an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    first_name: String,
    last_name: String,
}

impl NewPerson {
    pub fn new(first_name: String, last_name: String) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: required_text("firstName", first_name, NAME_MAX_LENGTH)?,
            last_name: required_text("lastName", last_name, NAME_MAX_LENGTH)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Person {
    pub fn reconstruct(id: PersonId, first_name: String, last_name: String) -> Self {
        Self {
            id,
            first_name,
            last_name,
        }
    }

    /// Merge supplied names; returns whether anything changed
    pub fn apply_update(&mut self, update: PersonUpdate) -> Result<bool, DomainError> {
        let first_name = supplied(update.first_name)
            .map(|n| required_text("firstName", n, NAME_MAX_LENGTH))
            .transpose()?;
        let last_name = supplied(update.last_name)
            .map(|n| required_text("lastName", n, NAME_MAX_LENGTH))
            .transpose()?;

        let mut changed = false;
        if let Some(first_name) = first_name.filter(|n| *n != self.first_name) {
            self.first_name = first_name;
            changed = true;
        }
        if let Some(last_name) = last_name.filter(|n| *n != self.last_name) {
            self.last_name = last_name;
            changed = true;
        }
        Ok(changed)
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person_requires_both_names() {
        assert!(NewPerson::new("Ada".into(), "Lovelace".into()).is_ok());
        assert!(NewPerson::new("".into(), "Lovelace".into()).is_err());
        assert!(NewPerson::new("Ada".into(), " ".into()).is_err());
        assert!(NewPerson::new("a".repeat(101), "Lovelace".into()).is_err());
    }

    #[test]
    fn test_apply_update_changes_only_supplied_names() {
        let mut person = NewPerson::new("Ada".into(), "Lovelace".into())
            .unwrap()
            .into_person(PersonId::new(1).unwrap());

        let changed = person
            .apply_update(PersonUpdate {
                first_name: Some("Augusta".into()),
                last_name: Some(String::new()),
            })
            .unwrap();

        assert!(changed);
        assert_eq!(person.first_name(), "Augusta");
        assert_eq!(person.last_name(), "Lovelace");

        let changed = person
            .apply_update(PersonUpdate {
                first_name: Some("Augusta".into()),
                last_name: None,
            })
            .unwrap();
        assert!(!changed);
    }
}
