//! Product endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::super::identity::Identity;
use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, DeletedBody, ErrorBody};
use crate::product::{NewProduct, Product, ProductFields, ProductPatch};

/// List all products
///
/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = [ProductFields]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state
        .products
        .list()
        .await
        .map_err(|e| ApiError::from_service("Failed to fetch products", e))?;
    Ok(Json(products))
}

/// Fetch one product
///
/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product record id")),
    responses(
        (status = 200, description = "The product", body = ProductFields),
        (status = 404, description = "Unknown product", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let product = state
        .products
        .get(&id)
        .await
        .map_err(|e| ApiError::from_service("Failed to fetch product", e))?;
    Ok(Json(product))
}

/// Create a product
///
/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Created", body = ProductFields),
        (status = 400, description = "Missing or malformed fields", body = ErrorBody),
        (status = 401, description = "No caller identity", body = ErrorBody),
        (status = 403, description = "sellerId is not the caller", body = ErrorBody)
    ),
    security(("user_id_header" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state
        .products
        .create(&identity.user_id, input)
        .await
        .map_err(|e| ApiError::from_service("Failed to create product", e))?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
///
/// PUT /api/products/{id}. Owning seller only; `sellerId` is immutable.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product record id")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Updated", body = ProductFields),
        (status = 403, description = "Caller is not the owning seller", body = ErrorBody),
        (status = 404, description = "Unknown product", body = ErrorBody)
    ),
    security(("user_id_header" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<Product>> {
    let product = state
        .products
        .update(&identity.user_id, &id, patch)
        .await
        .map_err(|e| ApiError::from_service("Failed to update product", e))?;
    Ok(Json(product))
}

/// Delete a product
///
/// DELETE /api/products/{id}. Owning seller only; existing orders keep
/// their snapshots.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product record id")),
    responses(
        (status = 200, description = "Deleted", body = DeletedBody),
        (status = 403, description = "Caller is not the owning seller", body = ErrorBody),
        (status = 404, description = "Unknown product", body = ErrorBody)
    ),
    security(("user_id_header" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedBody>> {
    state
        .products
        .delete(&identity.user_id, &id)
        .await
        .map_err(|e| ApiError::from_service("Failed to delete product", e))?;
    Ok(Json(DeletedBody {
        message: "Product deleted successfully".to_string(),
    }))
}
