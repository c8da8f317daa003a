use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ports::StoredBlob;
use crate::domain::entities::{CatalogImage, Person, Product};

/// Request body for `POST /api/products`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 32, message = "Category must be 1-32 characters"))]
    pub category: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(length(min = 1, max = 1024, message = "Description must be 1-1024 characters"))]
    pub description: String,
}

/// Request body for `PUT /api/products/{id}`. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(max = 32, message = "Category must be at most 32 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 64, message = "Name must be at most 64 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    #[validate(length(max = 1024, message = "Description must be at most 1024 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub category: String,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().to_string(),
            category: product.category().to_string(),
            name: product.name().to_string(),
            price: product.price().value(),
            description: product.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogImageResponse {
    pub id: String,
    pub blob_name: String,
    pub blob_url: String,
    pub product_category: String,
}

impl From<CatalogImage> for CatalogImageResponse {
    fn from(image: CatalogImage) -> Self {
        Self {
            id: image.id().to_string(),
            blob_name: image.blob_name().to_string(),
            blob_url: image.blob_url().to_string(),
            product_category: image.product_category().to_string(),
        }
    }
}

/// A blob in the catalog container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlobResponse {
    pub name: String,
    pub url: String,
    pub size_bytes: u64,
    pub content_type: String,
}

impl From<StoredBlob> for BlobResponse {
    fn from(blob: StoredBlob) -> Self {
        Self {
            name: blob.name.to_string(),
            url: blob.url,
            size_bytes: blob.size_bytes,
            content_type: blob.content_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id().value(),
            first_name: person.first_name().to_string(),
            last_name: person.last_name().to_string(),
        }
    }
}

/// A file received from a multipart form, fully buffered
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl FileUpload {
    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Form fields of `POST /api/catalogimage`
#[derive(Debug, Clone)]
pub struct CreateCatalogImageRequest {
    pub file: Option<FileUpload>,
    pub product_category: Option<String>,
}
