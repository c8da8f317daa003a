use std::sync::Arc;

use crate::application::dto::{CreateProductRequest, ProductResponse};
use crate::application::errors::ProductUseCaseError;
use crate::application::ports::{ProductRepository, RepositoryError};
use crate::application::validation::validate_payload;
use crate::domain::entities::Product;
use crate::domain::value_objects::{Category, Price, ProductId};

/// Use case: Create a product
pub struct CreateProductUseCase {
    repository: Arc<dyn ProductRepository>,
}

impl CreateProductUseCase {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, ProductUseCaseError> {
        validate_payload(&request)?;

        let product = Product::new(
            Category::new(request.category)?,
            request.name,
            Price::new(request.price)?,
            request.description,
        )?;

        self.repository.save(&product).await?;

        tracing::info!(product_id = %product.id(), category = %product.category(), "Product created");
        Ok(ProductResponse::from(product))
    }
}

/// Use case: List every product
pub struct ListAllProductsUseCase {
    repository: Arc<dyn ProductRepository>,
}

impl ListAllProductsUseCase {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<ProductResponse>, ProductUseCaseError> {
        let products = self.repository.list_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

/// Use case: Get one product by id
pub struct ListProductByIdUseCase {
    repository: Arc<dyn ProductRepository>,
}

impl ListProductByIdUseCase {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> Result<ProductResponse, ProductUseCaseError> {
        let id: ProductId = id.parse()?;

        self.repository
            .find_by_id(&id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| ProductUseCaseError::NotFound(id.to_string()))
    }
}

/// Use case: Delete a product
pub struct DeleteProductUseCase {
    repository: Arc<dyn ProductRepository>,
}

impl DeleteProductUseCase {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Deletes every partition copy of the product, newest first, so a copy
    /// left behind by an interrupted category change cannot resurface
    pub async fn execute(&self, id: &str) -> Result<(), ProductUseCaseError> {
        let id: ProductId = id.parse()?;

        let mut next = self.repository.find_by_id(&id).await?;
        if next.is_none() {
            return Err(ProductUseCaseError::NotFound(id.to_string()));
        }

        let mut removed: Vec<Category> = Vec::new();
        while let Some(product) = next {
            let category = product.category().clone();
            if removed.contains(&category) {
                // Store keeps returning a copy it claims to have removed
                return Err(RepositoryError::Internal(format!(
                    "product {} still present under '{}' after delete",
                    id, category
                ))
                .into());
            }

            match self.repository.delete(&id, &category).await {
                Ok(()) | Err(RepositoryError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
            removed.push(category);

            next = self.repository.find_by_id(&id).await?;
        }

        tracing::info!(product_id = %id, copies = removed.len(), "Product deleted");
        Ok(())
    }
}
