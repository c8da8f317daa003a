mod catalog_blobs;
mod catalog_images;
mod people;
mod products;
mod update_product;

pub use catalog_blobs::{
    DeleteCatalogBlobUseCase, ListCatalogBlobsUseCase, ReadBlobUseCase, UploadCatalogBlobUseCase,
};
pub use catalog_images::{
    CreateCatalogImageUseCase, DeleteCatalogImageUseCase, ListAllCatalogImagesUseCase,
    ListCatalogImageByIdUseCase,
};
pub use people::{
    CreatePersonUseCase, DeletePersonUseCase, ListAllPeopleUseCase, ListPersonByIdUseCase,
    UpdatePersonUseCase,
};
pub use products::{
    CreateProductUseCase, DeleteProductUseCase, ListAllProductsUseCase, ListProductByIdUseCase,
};
pub use update_product::{RekeyPolicy, UpdateProductUseCase};
