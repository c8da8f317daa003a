use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{ProductRepository, RepositoryError};
use crate::domain::entities::Product;
use crate::domain::value_objects::{Category, Price, ProductId};

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, category, name, price, description)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id, category) DO UPDATE SET
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                description = EXCLUDED.description,
                updated_at = NOW()
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.category().as_str())
        .bind(product.name())
        .bind(product.price().value())
        .bind(product.description())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        self.upsert(product).await
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, category, name, price, description
            FROM products
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_domain).collect()
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        // An interrupted category change can leave two rows; the newest wins
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, category, name, price, description
            FROM products
            WHERE id = $1
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_domain).transpose()
    }

    async fn find_by_id_and_category(
        &self,
        id: &ProductId,
        category: &Category,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, category, name, price, description
            FROM products
            WHERE id = $1 AND category = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(category.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_domain).transpose()
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        self.upsert(product).await
    }

    async fn delete(&self, id: &ProductId, category: &Category) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND category = $2")
            .bind(id.as_uuid())
            .bind(category.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("{} ({})", id, category)));
        }

        Ok(())
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: uuid::Uuid,
    category: String,
    name: String,
    price: f64,
    description: String,
}

impl ProductRow {
    fn into_domain(self) -> Result<Product, RepositoryError> {
        let category = Category::new(self.category)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let price =
            Price::new(self.price).map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(Product::reconstruct(
            ProductId::from_uuid(self.id),
            category,
            self.name,
            price,
            self.description,
        ))
    }
}
