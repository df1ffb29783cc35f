use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::entities::user;
use crate::services::users::CreateUserRequest;
use crate::{ApiResponse, ApiResult, AppState, PaginatedResponse, TenantListQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).delete(delete_user))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<user::Model> {
    let model = state.services.users.create_user(request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses((status = 200, description = "Users listed for the company")),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<PaginatedResponse<user::Model>> {
    let (items, total) = state
        .services
        .users
        .list_users(query.company_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::paged(
        items, total, query.page, query.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    responses(
        (status = 200, description = "User returned"),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<user::Model> {
    let model = state.services.users.get_user(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.users.delete_user(id).await?;
    Ok(Json(ApiResponse::success(())))
}
