use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entities::attachment;
use crate::services::attendees::CreateAttachmentRequest;
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachmentListQuery {
    pub event_id: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attachments).post(create_attachment))
        .route("/:id", get(get_attachment).delete(delete_attachment))
}

#[utoipa::path(
    post,
    path = "/api/v1/attachments",
    request_body = CreateAttachmentRequest,
    responses(
        (status = 200, description = "Attachment metadata recorded"),
        (status = 400, description = "Unsupported file type or size", body = crate::errors::ErrorResponse)
    ),
    tag = "attachments"
)]
pub async fn create_attachment(
    State(state): State<AppState>,
    Json(request): Json<CreateAttachmentRequest>,
) -> ApiResult<attachment::Model> {
    let model = state.services.attendees.create_attachment(request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/attachments",
    responses((status = 200, description = "Attachments listed for the event")),
    tag = "attachments"
)]
pub async fn list_attachments(
    State(state): State<AppState>,
    Query(query): Query<AttachmentListQuery>,
) -> ApiResult<Vec<attachment::Model>> {
    let items = state
        .services
        .attendees
        .list_attachments(query.event_id)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/attachments/{id}",
    responses(
        (status = 200, description = "Attachment returned"),
        (status = 404, description = "Attachment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "attachments"
)]
pub async fn get_attachment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<attachment::Model> {
    let model = state.services.attendees.get_attachment(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attachments/{id}",
    responses(
        (status = 200, description = "Attachment deleted; attendee references cleared"),
        (status = 404, description = "Attachment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "attachments"
)]
pub async fn delete_attachment(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.attendees.delete_attachment(id).await?;
    Ok(Json(ApiResponse::success(())))
}
