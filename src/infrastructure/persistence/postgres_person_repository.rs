use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{PersonRepository, RepositoryError};
use crate::domain::entities::{NewPerson, Person};
use crate::domain::value_objects::PersonId;

pub struct PostgresPersonRepository {
    pool: PgPool,
}

impl PostgresPersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepository for PostgresPersonRepository {
    async fn add(&self, person: &NewPerson) -> Result<Person, RepositoryError> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            INSERT INTO people (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(person.first_name())
        .bind(person.last_name())
        .fetch_one(&self.pool)
        .await?;

        row.into_domain()
    }

    async fn list_all(&self) -> Result<Vec<Person>, RepositoryError> {
        let rows = sqlx::query_as::<_, PersonRow>(
            "SELECT id, first_name, last_name FROM people ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PersonRow::into_domain).collect()
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, RepositoryError> {
        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT id, first_name, last_name FROM people WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PersonRow::into_domain).transpose()
    }

    async fn update(&self, person: &Person) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE people SET first_name = $2, last_name = $3 WHERE id = $1")
            .bind(person.id().value())
            .bind(person.first_name())
            .bind(person.last_name())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(person.id().to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: PersonId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PersonRow {
    id: i64,
    first_name: String,
    last_name: String,
}

impl PersonRow {
    fn into_domain(self) -> Result<Person, RepositoryError> {
        let id =
            PersonId::new(self.id).map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        Ok(Person::reconstruct(id, self.first_name, self.last_name))
    }
}
