use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::entities::company;
use crate::services::companies::CreateCompanyRequest;
use crate::{ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 200, description = "Company created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "companies"
)]
pub async fn create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> ApiResult<company::Model> {
    let model = state.services.companies.create_company(request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies",
    responses((status = 200, description = "Companies listed")),
    tag = "companies"
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<company::Model>> {
    let (items, total) = state
        .services
        .companies
        .list_companies(query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::paged(
        items, total, query.page, query.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    responses(
        (status = 200, description = "Company returned"),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse)
    ),
    tag = "companies"
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<company::Model> {
    let model = state.services.companies.get_company(id).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    put,
    path = "/api/v1/companies/{id}",
    request_body = CreateCompanyRequest,
    responses(
        (status = 200, description = "Company updated"),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse)
    ),
    tag = "companies"
)]
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CreateCompanyRequest>,
) -> ApiResult<company::Model> {
    let model = state.services.companies.update_company(id, request).await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    responses(
        (status = 200, description = "Company deleted with its whole subtree"),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse)
    ),
    tag = "companies"
)]
pub async fn delete_company(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.services.companies.delete_company(id).await?;
    Ok(Json(ApiResponse::success(())))
}
