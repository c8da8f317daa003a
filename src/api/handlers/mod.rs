use axum::{extract::rejection::JsonRejection, Json};

use crate::api::errors::ApiError;

pub mod blobs;
pub mod catalog;
pub mod catalog_images;
pub mod health;
mod multipart;
pub mod people;
pub mod products;

pub use blobs::read_blob_handler;
pub use catalog::{delete_catalog_blob_handler, list_catalog_blobs_handler, upload_catalog_blob_handler};
pub use catalog_images::{
    create_catalog_image_handler, delete_catalog_image_handler, get_catalog_image_handler,
    list_catalog_images_handler,
};
pub use health::{health_handler, readiness_handler};
pub use people::{
    create_person_handler, delete_person_handler, get_person_handler, list_people_handler,
    update_person_handler,
};
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    update_product_handler,
};

/// Unwraps a JSON body, turning extractor rejections into 400 envelopes
pub(crate) fn read_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}
