use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::entities::attendee;
use crate::services::attendees::{CreateAttendeeRequest, UpdateAttendeeRequest};
use crate::{ApiResponse, ApiResult, AppState, PaginatedResponse, TenantListQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendees).post(create_attendee))
        .route(
            "/:id",
            get(get_attendee).put(update_attendee).delete(delete_attendee),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/attendees",
    request_body = CreateAttendeeRequest,
    responses(
        (status = 200, description = "Attendee created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "attendees"
)]
pub async fn create_attendee(
    State(state): State<AppState>,
    Json(request): Json<CreateAttendeeRequest>,
) -> ApiResult<attendee::Model> {
    let model = state.services.attendees.create_attendee(request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendees",
    responses((status = 200, description = "Attendees listed for the company")),
    tag = "attendees"
)]
pub async fn list_attendees(
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<PaginatedResponse<attendee::Model>> {
    let (items, total) = state
        .services
        .attendees
        .list_attendees(query.company_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::paged(
        items, total, query.page, query.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendees/{id}",
    responses(
        (status = 200, description = "Attendee returned"),
        (status = 404, description = "Attendee not found", body = crate::errors::ErrorResponse)
    ),
    tag = "attendees"
)]
pub async fn get_attendee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<attendee::Model> {
    let model = state.services.attendees.get_attendee(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    put,
    path = "/api/v1/attendees/{id}",
    request_body = UpdateAttendeeRequest,
    responses(
        (status = 200, description = "Attendee updated"),
        (status = 404, description = "Attendee not found", body = crate::errors::ErrorResponse)
    ),
    tag = "attendees"
)]
pub async fn update_attendee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAttendeeRequest>,
) -> ApiResult<attendee::Model> {
    let model = state
        .services
        .attendees
        .update_attendee(id, request)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attendees/{id}",
    responses(
        (status = 200, description = "Attendee deleted"),
        (status = 404, description = "Attendee not found", body = crate::errors::ErrorResponse)
    ),
    tag = "attendees"
)]
pub async fn delete_attendee(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.attendees.delete_attendee(id).await?;
    Ok(Json(ApiResponse::success(())))
}
