mod blob_name;
mod category;
mod container;
mod database_url;
mod entity_ids;
mod price;
mod public_base_url;

pub use blob_name::BlobName;
pub use category::Category;
pub use container::{ContainerDefinition, ContainerName};
pub use database_url::DatabaseUrl;
pub use entity_ids::{CatalogImageId, PersonId, ProductId};
pub use price::Price;
pub use public_base_url::PublicBaseUrl;
