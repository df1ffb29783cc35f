use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entities::inventory_item;
use crate::services::inventory::{CreateInventoryItemRequest, UpdateInventoryItemRequest};
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct InventoryListQuery {
    pub event_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockDeltaRequest {
    /// Signed one-shot delta applied to quantity_available
    pub delta: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockQuantityRequest {
    pub quantity: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/:id/apply-delta", post(apply_stock_delta))
        .route("/:id/use", post(use_stock))
        .route("/:id/return", post(return_stock))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = CreateInventoryItemRequest,
    responses(
        (status = 200, description = "Inventory item created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateInventoryItemRequest>,
) -> ApiResult<inventory_item::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .inventory
        .create_item(request, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses((status = 200, description = "Inventory listed for the event")),
    tag = "inventory"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<InventoryListQuery>,
) -> ApiResult<Vec<inventory_item::Model>> {
    let items = state.services.inventory.list_items(query.event_id).await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    responses(
        (status = 200, description = "Inventory item returned"),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<inventory_item::Model> {
    let model = state.services.inventory.get_item(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    put,
    path = "/api/v1/inventory/{id}",
    request_body = UpdateInventoryItemRequest,
    responses(
        (status = 200, description = "Item details updated; stock untouched"),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(request): Json<UpdateInventoryItemRequest>,
) -> ApiResult<inventory_item::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .inventory
        .update_item(id, request, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.inventory.delete_item(id).await?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/apply-delta",
    request_body = StockDeltaRequest,
    responses(
        (status = 200, description = "Delta applied exactly once"),
        (status = 422, description = "Delta would drive availability negative", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn apply_stock_delta(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(request): Json<StockDeltaRequest>,
) -> ApiResult<inventory_item::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .inventory
        .apply_stock_delta(id, request.delta, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/use",
    request_body = StockQuantityRequest,
    responses(
        (status = 200, description = "Stock consumed"),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn use_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(request): Json<StockQuantityRequest>,
) -> ApiResult<inventory_item::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .inventory
        .use_stock(id, request.quantity, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/return",
    request_body = StockQuantityRequest,
    responses(
        (status = 200, description = "Stock returned to availability"),
        (status = 400, description = "Invalid quantity", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn return_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(request): Json<StockQuantityRequest>,
) -> ApiResult<inventory_item::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .inventory
        .return_stock(id, request.quantity, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}
