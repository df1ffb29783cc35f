use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::entities::ticket_category;
use crate::services::ticket_categories::{CreateTicketCategoryRequest, UpdateTicketCategoryRequest};
use crate::{ApiResponse, ApiResult, AppState, PaginatedResponse, TenantListQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/ticket-categories",
    request_body = CreateTicketCategoryRequest,
    responses(
        (status = 200, description = "Ticket category created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "ticket-categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketCategoryRequest>,
) -> ApiResult<ticket_category::Model> {
    let model = state
        .services
        .ticket_categories
        .create_category(request)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/ticket-categories",
    responses((status = 200, description = "Ticket categories listed for the company")),
    tag = "ticket-categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<PaginatedResponse<ticket_category::Model>> {
    let (items, total) = state
        .services
        .ticket_categories
        .list_categories(query.company_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::paged(
        items, total, query.page, query.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/ticket-categories/{id}",
    responses(
        (status = 200, description = "Ticket category returned"),
        (status = 404, description = "Ticket category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "ticket-categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ticket_category::Model> {
    let model = state.services.ticket_categories.get_category(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    put,
    path = "/api/v1/ticket-categories/{id}",
    request_body = UpdateTicketCategoryRequest,
    responses(
        (status = 200, description = "Ticket category updated"),
        (status = 404, description = "Ticket category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "ticket-categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTicketCategoryRequest>,
) -> ApiResult<ticket_category::Model> {
    let model = state
        .services
        .ticket_categories
        .update_category(id, request)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/ticket-categories/{id}",
    responses(
        (status = 200, description = "Ticket category deleted"),
        (status = 404, description = "Ticket category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "ticket-categories"
)]
pub async fn delete_category(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.ticket_categories.delete_category(id).await?;
    Ok(Json(ApiResponse::success(())))
}
