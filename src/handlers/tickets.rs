use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entities::ticket;
use crate::services::tickets::IssueTicketRequest;
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct TicketListQuery {
    pub purchase_id: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets).post(issue_ticket))
        .route("/:id", get(get_ticket).delete(revoke_ticket))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = IssueTicketRequest,
    responses(
        (status = 200, description = "Ticket issued; sold count recomputed"),
        (status = 422, description = "Category capacity exhausted", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase or attendee not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn issue_ticket(
    State(state): State<AppState>,
    Json(request): Json<IssueTicketRequest>,
) -> ApiResult<ticket::Model> {
    let model = state.services.tickets.issue_ticket(request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    responses((status = 200, description = "Tickets listed for the purchase")),
    tag = "tickets"
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketListQuery>,
) -> ApiResult<Vec<ticket::Model>> {
    let items = state
        .services
        .tickets
        .list_tickets_for_purchase(query.purchase_id)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    responses(
        (status = 200, description = "Ticket returned"),
        (status = 404, description = "Ticket not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn get_ticket(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<ticket::Model> {
    let model = state.services.tickets.get_ticket(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}",
    responses(
        (status = 200, description = "Ticket revoked; sold count recomputed"),
        (status = 404, description = "Ticket not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn revoke_ticket(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.tickets.revoke_ticket(id).await?;
    Ok(Json(ApiResponse::success(())))
}
