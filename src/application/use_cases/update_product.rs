use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::{ProductResponse, UpdateProductRequest};
use crate::application::errors::ProductUseCaseError;
use crate::application::ports::{ProductRepository, RepositoryError};
use crate::application::validation::validate_payload;
use crate::domain::entities::ProductUpdate;
use crate::domain::value_objects::{Category, ProductId};

/// Retry settings for removing the old copy after a category change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RekeyPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl RekeyPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }
}

impl Default for RekeyPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

/// Use case: Partially update a product.
///
/// A category change moves the product between partition keys in two steps:
/// the merged product is upserted under the new category, then the row under
/// the old category is deleted. The delete is idempotent (`NotFound` counts as
/// done) and is retried with exponential backoff according to [`RekeyPolicy`].
pub struct UpdateProductUseCase {
    repository: Arc<dyn ProductRepository>,
    rekey_policy: RekeyPolicy,
}

impl UpdateProductUseCase {
    pub fn new(repository: Arc<dyn ProductRepository>, rekey_policy: RekeyPolicy) -> Self {
        Self {
            repository,
            rekey_policy,
        }
    }

    pub async fn execute(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, ProductUseCaseError> {
        validate_payload(&request)?;
        let id: ProductId = id.parse()?;

        let mut product = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ProductUseCaseError::NotFound(id.to_string()))?;

        let merge = product.apply_update(ProductUpdate {
            category: request.category,
            name: request.name,
            price: request.price,
            description: request.description,
        })?;

        if !merge.changed {
            tracing::debug!(product_id = %id, "Update carried no changes");
            return Ok(ProductResponse::from(product));
        }

        // Step 1: write under the (possibly new) category key
        self.repository.update(&product).await?;

        // Step 2: drop the copy under the old key
        if let Some(previous_category) = merge.previous_category {
            tracing::info!(
                product_id = %id,
                from = %previous_category,
                to = %product.category(),
                "Product category changed, removing old partition copy"
            );
            self.remove_stale_copy(&id, &previous_category).await?;
        }

        Ok(ProductResponse::from(product))
    }

    async fn remove_stale_copy(
        &self,
        id: &ProductId,
        stale_category: &Category,
    ) -> Result<(), ProductUseCaseError> {
        let mut delay = self.rekey_policy.initial_backoff;

        for attempt in 1..=self.rekey_policy.max_attempts {
            match self.repository.delete(id, stale_category).await {
                Ok(()) | Err(RepositoryError::NotFound(_)) => return Ok(()),
                Err(e) if attempt < self.rekey_policy.max_attempts => {
                    tracing::warn!(
                        product_id = %id,
                        category = %stale_category,
                        attempt,
                        "Failed to delete old partition copy, retrying in {:?}: {}",
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_backoff(delay);
                }
                Err(e) => {
                    tracing::error!(
                        product_id = %id,
                        category = %stale_category,
                        attempts = attempt,
                        "Giving up on deleting old partition copy: {}",
                        e
                    );
                }
            }
        }

        Err(ProductUseCaseError::RekeyIncomplete {
            id: id.to_string(),
            stale_category: stale_category.to_string(),
        })
    }
}

/// Doubles the retry delay, capped at `Duration::MAX`
fn next_backoff(delay: Duration) -> Duration {
    delay.saturating_mul(2)
}
