use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};

use crate::entities::{event, event_ticket_category};
use crate::services::events::{CreateEventRequest, SetAllotmentRequest, UpdateEventRequest};
use crate::{ApiResponse, ApiResult, AppState, PaginatedResponse, TenantListQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/:id/allotments", get(list_allotments).put(set_allotment))
        .route("/:id/reclaim-inventory", post(reclaim_inventory))
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<event::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .events
        .create_event(request, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/events",
    responses((status = 200, description = "Events listed for the company")),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<PaginatedResponse<event::Model>> {
    let (items, total) = state
        .services
        .events
        .list_events(query.company_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::paged(
        items, total, query.page, query.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    responses(
        (status = 200, description = "Event returned"),
        (status = 404, description = "Event not found", body = crate::errors::ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<event::Model> {
    let model = state.services.events.get_event(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated"),
        (status = 404, description = "Event not found", body = crate::errors::ErrorResponse)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(request): Json<UpdateEventRequest>,
) -> ApiResult<event::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .events
        .update_event(id, request, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    responses(
        (status = 200, description = "Event deleted; consumed inventory reclaimed first"),
        (status = 404, description = "Event not found", body = crate::errors::ErrorResponse)
    ),
    tag = "events"
)]
pub async fn delete_event(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.events.delete_event(id).await?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    put,
    path = "/api/v1/events/{id}/allotments",
    request_body = SetAllotmentRequest,
    responses(
        (status = 200, description = "Allotment created or resized"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "events"
)]
pub async fn set_allotment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SetAllotmentRequest>,
) -> ApiResult<event_ticket_category::Model> {
    let model = state.services.events.set_allotment(id, request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/allotments",
    responses((status = 200, description = "Allotments listed")),
    tag = "events"
)]
pub async fn list_allotments(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<event_ticket_category::Model>> {
    let items = state.services.events.list_allotments(id).await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/reclaim-inventory",
    responses((status = 200, description = "Consumed stock restored for every item of the event")),
    tag = "events"
)]
pub async fn reclaim_inventory(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<u64> {
    let reclaimed = state.services.inventory.reclaim_event_inventory(id).await?;
    Ok(Json(ApiResponse::success(reclaimed)))
}
