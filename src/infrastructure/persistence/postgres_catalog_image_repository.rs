use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{CatalogImageRepository, RepositoryError};
use crate::domain::entities::CatalogImage;
use crate::domain::value_objects::{BlobName, CatalogImageId, Category};

pub struct PostgresCatalogImageRepository {
    pool: PgPool,
}

impl PostgresCatalogImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogImageRepository for PostgresCatalogImageRepository {
    async fn save(&self, image: &CatalogImage) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO catalog_images (id, product_category, blob_name, blob_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id, product_category) DO UPDATE SET
                blob_name = EXCLUDED.blob_name,
                blob_url = EXCLUDED.blob_url
            "#,
        )
        .bind(image.id().as_uuid())
        .bind(image.product_category().as_str())
        .bind(image.blob_name().as_str())
        .bind(image.blob_url())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CatalogImage>, RepositoryError> {
        let rows = sqlx::query_as::<_, CatalogImageRow>(
            r#"
            SELECT id, product_category, blob_name, blob_url
            FROM catalog_images
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CatalogImageRow::into_domain).collect()
    }

    async fn find_by_id(
        &self,
        id: &CatalogImageId,
    ) -> Result<Option<CatalogImage>, RepositoryError> {
        let row = sqlx::query_as::<_, CatalogImageRow>(
            r#"
            SELECT id, product_category, blob_name, blob_url
            FROM catalog_images
            WHERE id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CatalogImageRow::into_domain).transpose()
    }

    async fn find_by_id_and_category(
        &self,
        id: &CatalogImageId,
        category: &Category,
    ) -> Result<Option<CatalogImage>, RepositoryError> {
        let row = sqlx::query_as::<_, CatalogImageRow>(
            r#"
            SELECT id, product_category, blob_name, blob_url
            FROM catalog_images
            WHERE id = $1 AND product_category = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(category.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CatalogImageRow::into_domain).transpose()
    }

    async fn delete(
        &self,
        id: &CatalogImageId,
        category: &Category,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM catalog_images WHERE id = $1 AND product_category = $2")
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

#[derive(sqlx::FromRow)]
struct CatalogImageRow {
    id: uuid::Uuid,
    product_category: String,
    blob_name: String,
    blob_url: String,
}

impl CatalogImageRow {
    fn into_domain(self) -> Result<CatalogImage, RepositoryError> {
        let category = Category::new(self.product_category)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let blob_name = BlobName::new(self.blob_name)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(CatalogImage::new(
            CatalogImageId::from_uuid(self.id),
            blob_name,
            self.blob_url,
            category,
        ))
    }
}
