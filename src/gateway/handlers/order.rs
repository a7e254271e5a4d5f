//! Order endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::super::identity::Identity;
use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ErrorBody};
use crate::order::{NewOrder, Order, OrderFields};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// List orders
///
/// GET /api/orders. With `?userId=`, only orders where that user is buyer
/// or seller (deduplicated); without, all orders.
#[utoipa::path(
    get,
    path = "/api/orders",
    params(("userId" = Option<String>, Query, description = "Restrict to a participant")),
    responses(
        (status = 200, description = "Orders", body = [OrderFields]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = state
        .orders
        .list(query.user_id.as_deref())
        .await
        .map_err(|e| ApiError::from_service("Failed to fetch orders", e))?;
    Ok(Json(orders))
}

/// Fetch one order
///
/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order record id")),
    responses(
        (status = 200, description = "The order", body = OrderFields),
        (status = 404, description = "Unknown order", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let order = state
        .orders
        .get(&id)
        .await
        .map_err(|e| ApiError::from_service("Failed to fetch order", e))?;
    Ok(Json(order))
}

/// Place an order
///
/// POST /api/orders. Snapshots the product's name, seller, and
/// `price * quantity`; the order always starts `Pending`.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Created", body = OrderFields),
        (status = 400, description = "Missing or malformed fields", body = ErrorBody),
        (status = 401, description = "No caller identity", body = ErrorBody),
        (status = 403, description = "buyerId is not the caller", body = ErrorBody),
        (status = 404, description = "Unknown product", body = ErrorBody),
        (status = 409, description = "Product changed mid-flight", body = ErrorBody)
    ),
    security(("user_id_header" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state
        .orders
        .create(&identity.user_id, input)
        .await
        .map_err(|e| ApiError::from_service("Failed to create order", e))?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Transition an order's status
///
/// PUT /api/orders/{id}/status. Only `Pending -> Shipped`,
/// `Pending -> Cancelled`, and `Shipped -> Delivered` are legal.
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    params(("id" = String, Path, description = "Order record id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated", body = OrderFields),
        (status = 400, description = "Missing or unrecognized status", body = ErrorBody),
        (status = 403, description = "Caller is not a participant", body = ErrorBody),
        (status = 404, description = "Unknown order", body = ErrorBody),
        (status = 409, description = "Illegal transition", body = ErrorBody)
    ),
    security(("user_id_header" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Order>> {
    let order = state
        .orders
        .update_status(&identity.user_id, &id, req.status.as_deref())
        .await
        .map_err(|e| ApiError::from_service("Failed to update order", e))?;
    Ok(Json(order))
}
