use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use std::sync::Arc;

use super::read_json;
use crate::api::errors::{ApiError, ErrorBody};
use crate::application::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::application::use_cases::{
    CreateProductUseCase, DeleteProductUseCase, ListAllProductsUseCase, ListProductByIdUseCase,
    UpdateProductUseCase,
};

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product", body = ErrorBody)
    )
)]
pub async fn create_product_handler(
    State(use_case): State<Arc<CreateProductUseCase>>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let request = read_json(payload)?;
    Ok(Json(use_case.execute(request).await?))
}

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses((status = 200, description = "All products", body = [ProductResponse]))
)]
pub async fn list_products_handler(
    State(use_case): State<Arc<ListAllProductsUseCase>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    Ok(Json(use_case.execute().await?))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id (UUID)")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn get_product_handler(
    State(use_case): State<Arc<ListProductByIdUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    Ok(Json(use_case.execute(&id).await?))
}

/// PUT /api/products/{id}
/// Only supplied, non-empty fields change. A new category moves the product.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id (UUID)")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid update", body = ErrorBody),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn update_product_handler(
    State(use_case): State<Arc<UpdateProductUseCase>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let request = read_json(payload)?;
    Ok(Json(use_case.execute(&id, request).await?))
}

/// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id (UUID)")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn delete_product_handler(
    State(use_case): State<Arc<DeleteProductUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    use_case.execute(&id).await?;
    Ok(Json(true))
}
