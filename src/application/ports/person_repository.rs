use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::{NewPerson, Person};
use crate::domain::value_objects::PersonId;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for person persistence. The store assigns ids.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn add(&self, person: &NewPerson) -> Result<Person, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Person>, RepositoryError>;

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, RepositoryError>;

    /// Overwrite an existing person; `NotFound` when the id is unknown
    async fn update(&self, person: &Person) -> Result<(), RepositoryError>;

    async fn delete(&self, id: PersonId) -> Result<(), RepositoryError>;
}
