use serde::{Deserialize, Serialize};

use super::{required_text, supplied};
use crate::domain::{
    errors::DomainError,
    value_objects::{Category, Price, ProductId},
};

/// Product aggregate, partitioned by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    category: Category,
    name: String,
    price: Price,
    description: String,
}

/// Raw partial update as received from a client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub category: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

/// Outcome of merging a [`ProductUpdate`] into a product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductMerge {
    pub changed: bool,
    /// Set only when the category moved to a different value
    pub previous_category: Option<Category>,
}

impl ProductMerge {
    pub fn requires_rekey(&self) -> bool {
        self.previous_category.is_some()
    }
}

impl Product {
    pub const NAME_MAX_LENGTH: usize = 64;
    pub const DESCRIPTION_MAX_LENGTH: usize = 1024;

    /// Create a new product with a fresh id
    pub fn new(
        category: Category,
        name: String,
        price: Price,
        description: String,
    ) -> Result<Self, DomainError> {
        Self::with_id(ProductId::new(), category, name, price, description)
    }

    pub fn with_id(
        id: ProductId,
        category: Category,
        name: String,
        price: Price,
        description: String,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            category,
            name: required_text("name", name, Self::NAME_MAX_LENGTH)?,
            price,
            description: required_text("description", description, Self::DESCRIPTION_MAX_LENGTH)?,
        })
    }

    /// Reconstruct from storage without re-validating
    pub fn reconstruct(
        id: ProductId,
        category: Category,
        name: String,
        price: Price,
        description: String,
    ) -> Self {
        Self {
            id,
            category,
            name,
            price,
            description,
        }
    }

    /// Merge the supplied fields of `update` into this product.
    ///
    /// All supplied values are validated before anything is assigned, so a
    /// failed merge leaves the product untouched.
    pub fn apply_update(&mut self, update: ProductUpdate) -> Result<ProductMerge, DomainError> {
        let category = supplied(update.category).map(Category::new).transpose()?;
        let name = supplied(update.name)
            .map(|n| required_text("name", n, Self::NAME_MAX_LENGTH))
            .transpose()?;
        let price = update.price.map(Price::new).transpose()?;
        let description = supplied(update.description)
            .map(|d| required_text("description", d, Self::DESCRIPTION_MAX_LENGTH))
            .transpose()?;

        let mut changed = false;
        let mut previous_category = None;

        if let Some(category) = category {
            if category != self.category {
                previous_category = Some(std::mem::replace(&mut self.category, category));
                changed = true;
            }
        }

        if let Some(name) = name {
            if name != self.name {
                self.name = name;
                changed = true;
            }
        }

        if let Some(price) = price {
            if price != self.price {
                self.price = price;
                changed = true;
            }
        }

        if let Some(description) = description {
            if description != self.description {
                self.description = description;
                changed = true;
            }
        }

        Ok(ProductMerge {
            changed,
            previous_category,
        })
    }

    // Getters
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
