use std::sync::Arc;

use crate::application::dto::{CreatePersonRequest, PersonResponse, UpdatePersonRequest};
use crate::application::errors::PersonUseCaseError;
use crate::application::ports::{PersonRepository, RepositoryError};
use crate::application::validation::validate_payload;
use crate::domain::entities::{NewPerson, PersonUpdate};
use crate::domain::value_objects::PersonId;

fn not_found_or(id: PersonId, err: RepositoryError) -> PersonUseCaseError {
    match err {
        RepositoryError::NotFound(_) => PersonUseCaseError::NotFound(id.to_string()),
        other => PersonUseCaseError::Repository(other),
    }
}

/// Use case: Create a person; the store assigns the id
pub struct CreatePersonUseCase {
    repository: Arc<dyn PersonRepository>,
}

impl CreatePersonUseCase {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        request: CreatePersonRequest,
    ) -> Result<PersonResponse, PersonUseCaseError> {
        validate_payload(&request)?;
        let person = NewPerson::new(request.first_name, request.last_name)?;

        let person = self.repository.add(&person).await?;

        tracing::info!(person_id = %person.id(), "Person created");
        Ok(PersonResponse::from(person))
    }
}

pub struct ListAllPeopleUseCase {
    repository: Arc<dyn PersonRepository>,
}

impl ListAllPeopleUseCase {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<PersonResponse>, PersonUseCaseError> {
        let people = self.repository.list_all().await?;
        Ok(people.into_iter().map(PersonResponse::from).collect())
    }
}

pub struct ListPersonByIdUseCase {
    repository: Arc<dyn PersonRepository>,
}

impl ListPersonByIdUseCase {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> Result<PersonResponse, PersonUseCaseError> {
        let id: PersonId = id.parse()?;

        self.repository
            .find_by_id(id)
            .await?
            .map(PersonResponse::from)
            .ok_or_else(|| PersonUseCaseError::NotFound(id.to_string()))
    }
}

/// Use case: Partially update a person's names
pub struct UpdatePersonUseCase {
    repository: Arc<dyn PersonRepository>,
}

impl UpdatePersonUseCase {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        id: &str,
        request: UpdatePersonRequest,
    ) -> Result<PersonResponse, PersonUseCaseError> {
        validate_payload(&request)?;
        let id: PersonId = id.parse()?;

        let mut person = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersonUseCaseError::NotFound(id.to_string()))?;

        let changed = person.apply_update(PersonUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
        })?;

        if changed {
            self.repository
                .update(&person)
                .await
                .map_err(|e| not_found_or(id, e))?;
            tracing::info!(person_id = %id, "Person updated");
        }

        Ok(PersonResponse::from(person))
    }
}

pub struct DeletePersonUseCase {
    repository: Arc<dyn PersonRepository>,
}

impl DeletePersonUseCase {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> Result<(), PersonUseCaseError> {
        let id: PersonId = id.parse()?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| not_found_or(id, e))?;

        tracing::info!(person_id = %id, "Person deleted");
        Ok(())
    }
}
