//! Process-local repositories backed by `DashMap`, selected with
//! `PERSISTENCE_BACKEND=memory`. Data is lost on restart.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::application::ports::{
    CatalogImageRepository, PersonRepository, ProductRepository, RepositoryError,
};
use crate::domain::entities::{CatalogImage, NewPerson, Person, Product};
use crate::domain::value_objects::{CatalogImageId, Category, PersonId, ProductId};

/// A stored value with insertion and last-write sequence numbers
#[derive(Clone)]
struct Versioned<T> {
    value: T,
    created: u64,
    updated: u64,
}

/// Rows keyed by `(id, partition)` with the ordering a table would give
struct PartitionedTable<I, T> {
    rows: DashMap<(I, Category), Versioned<T>>,
    sequence: AtomicU64,
}

impl<I, T> PartitionedTable<I, T>
where
    I: Copy + Eq + std::hash::Hash,
    T: Clone,
{
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    fn upsert(&self, id: I, partition: Category, value: T) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.rows
            .entry((id, partition))
            .and_modify(|row| {
                row.value = value.clone();
                row.updated = seq;
            })
            .or_insert(Versioned {
                value,
                created: seq,
                updated: seq,
            });
    }

    fn list(&self) -> Vec<T> {
        let mut rows: Vec<Versioned<T>> = self.rows.iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|r| r.created);
        rows.into_iter().map(|r| r.value).collect()
    }

    /// Newest row for `id` across partitions
    fn find(&self, id: I) -> Option<T> {
        self.rows
            .iter()
            .filter(|r| r.key().0 == id)
            .max_by_key(|r| r.value().updated)
            .map(|r| r.value().value.clone())
    }

    fn find_in(&self, id: I, partition: &Category) -> Option<T> {
        self.rows
            .get(&(id, partition.clone()))
            .map(|r| r.value().value.clone())
    }

    fn remove(&self, id: I, partition: &Category) -> bool {
        self.rows.remove(&(id, partition.clone())).is_some()
    }
}

pub struct InMemoryProductRepository {
    table: PartitionedTable<ProductId, Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: PartitionedTable::new(),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        self.table
            .upsert(*product.id(), product.category().clone(), product.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.table.list())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.table.find(*id))
    }

    async fn find_by_id_and_category(
        &self,
        id: &ProductId,
        category: &Category,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self.table.find_in(*id, category))
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        self.save(product).await
    }

    async fn delete(&self, id: &ProductId, category: &Category) -> Result<(), RepositoryError> {
        if self.table.remove(*id, category) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(format!("{} ({})", id, category)))
        }
    }
}

pub struct InMemoryCatalogImageRepository {
    table: PartitionedTable<CatalogImageId, CatalogImage>,
}

impl InMemoryCatalogImageRepository {
    pub fn new() -> Self {
        Self {
            table: PartitionedTable::new(),
        }
    }
}

impl Default for InMemoryCatalogImageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogImageRepository for InMemoryCatalogImageRepository {
    async fn save(&self, image: &CatalogImage) -> Result<(), RepositoryError> {
        self.table
            .upsert(*image.id(), image.product_category().clone(), image.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CatalogImage>, RepositoryError> {
        Ok(self.table.list())
    }

    async fn find_by_id(
        &self,
        id: &CatalogImageId,
    ) -> Result<Option<CatalogImage>, RepositoryError> {
        Ok(self.table.find(*id))
    }

    async fn find_by_id_and_category(
        &self,
        id: &CatalogImageId,
        category: &Category,
    ) -> Result<Option<CatalogImage>, RepositoryError> {
        Ok(self.table.find_in(*id, category))
    }

    async fn delete(
        &self,
        id: &CatalogImageId,
        category: &Category,
    ) -> Result<(), RepositoryError> {
        if self.table.remove(*id, category) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(format!("{} ({})", id, category)))
        }
    }
}

pub struct InMemoryPersonRepository {
    people: DashMap<PersonId, Person>,
    next_id: AtomicI64,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self {
            people: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn add(&self, person: &NewPerson) -> Result<Person, RepositoryError> {
        let id = PersonId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
            .map_err(|e| RepositoryError::Internal(e.to_string()))?;
        let person = person.clone().into_person(id);
        self.people.insert(id, person.clone());
        Ok(person)
    }

    async fn list_all(&self) -> Result<Vec<Person>, RepositoryError> {
        let mut people: Vec<Person> = self.people.iter().map(|p| p.value().clone()).collect();
        people.sort_by_key(|p| p.id());
        Ok(people)
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, RepositoryError> {
        Ok(self.people.get(&id).map(|p| p.value().clone()))
    }

    async fn update(&self, person: &Person) -> Result<(), RepositoryError> {
        match self.people.get_mut(&person.id()) {
            Some(mut stored) => {
                *stored = person.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(person.id().to_string())),
        }
    }

    async fn delete(&self, id: PersonId) -> Result<(), RepositoryError> {
        self.people
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Price;

    fn product(category: &str) -> Product {
        Product::new(
            Category::new(category).unwrap(),
            "Runner".to_string(),
            Price::new(10.0).unwrap(),
            "desc".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_product_keyed_by_id_and_category() {
        let repo = InMemoryProductRepository::new();
        let original = product("shoes");
        let id = *original.id();
        repo.save(&original).await.unwrap();

        let moved = Product::reconstruct(
            id,
            Category::new("boots").unwrap(),
            "Runner".to_string(),
            Price::new(10.0).unwrap(),
            "desc".to_string(),
        );
        repo.update(&moved).await.unwrap();

        // Both keys exist until the old one is deleted; the newest wins by id
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().category().as_str(), "boots");

        repo.delete(&id, &Category::new("shoes").unwrap()).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap(), vec![moved]);
    }

    #[tokio::test]
    async fn test_product_delete_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo
            .delete(&ProductId::new(), &Category::new("shoes").unwrap())
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_product_list_keeps_insertion_order() {
        let repo = InMemoryProductRepository::new();
        let products: Vec<_> = ["a-cat", "b-cat", "c-cat"].into_iter().map(product).collect();
        for p in &products {
            repo.save(p).await.unwrap();
        }

        assert_eq!(repo.list_all().await.unwrap(), products);
    }

    #[tokio::test]
    async fn test_person_ids_are_assigned_sequentially() {
        let repo = InMemoryPersonRepository::new();
        let first = repo
            .add(&NewPerson::new("Ada".into(), "Lovelace".into()).unwrap())
            .await
            .unwrap();
        let second = repo
            .add(&NewPerson::new("Alan".into(), "Turing".into()).unwrap())
            .await
            .unwrap();

        assert_eq!(first.id().value(), 1);
        assert_eq!(second.id().value(), 2);
        assert_eq!(repo.list_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_person_update_and_delete_unknown() {
        let repo = InMemoryPersonRepository::new();
        let ghost = Person::reconstruct(PersonId::new(5).unwrap(), "A".into(), "B".into());

        assert!(matches!(
            repo.update(&ghost).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(ghost.id()).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
