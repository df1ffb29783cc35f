use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::entities::purchase;
use crate::services::purchases::CreatePurchaseRequest;
use crate::{ApiResponse, ApiResult, AppState, PaginatedResponse, TenantListQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchases).post(create_purchase))
        .route("/:id", get(get_purchase).delete(delete_purchase))
}

#[utoipa::path(
    post,
    path = "/api/v1/purchases",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 200, description = "Purchase created"),
        (status = 422, description = "No tickets available in the category", body = crate::errors::ErrorResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "purchases"
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(request): Json<CreatePurchaseRequest>,
) -> ApiResult<purchase::Model> {
    let model = state.services.purchases.create_purchase(request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/purchases",
    responses((status = 200, description = "Purchases listed for the company")),
    tag = "purchases"
)]
pub async fn list_purchases(
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<PaginatedResponse<purchase::Model>> {
    let (items, total) = state
        .services
        .purchases
        .list_purchases(query.company_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::paged(
        items, total, query.page, query.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/purchases/{id}",
    responses(
        (status = 200, description = "Purchase returned"),
        (status = 404, description = "Purchase not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchases"
)]
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<purchase::Model> {
    let model = state.services.purchases.get_purchase(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/purchases/{id}",
    responses(
        (status = 200, description = "Purchase deleted; sold counts recomputed"),
        (status = 404, description = "Purchase not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchases"
)]
pub async fn delete_purchase(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.purchases.delete_purchase(id).await?;
    Ok(Json(ApiResponse::success(())))
}
