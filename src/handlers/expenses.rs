use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entities::{expense, inventory_item};
use crate::services::expenses::{CreateExpenseRequest, ExpenseResponse};
use crate::{ApiResponse, ApiResult, AppState, PaginatedResponse, TenantListQuery};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpenseItemQuantityRequest {
    pub quantity: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:id", get(get_expense).delete(delete_expense))
        .route(
            "/:id/items/:inventory_item_id",
            put(apply_expense_item).delete(remove_expense_item),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 200, description = "Expense created; stock consumed per item"),
        (status = 422, description = "Insufficient stock for a line", body = crate::errors::ErrorResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "expenses"
)]
pub async fn create_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateExpenseRequest>,
) -> ApiResult<ExpenseResponse> {
    let acting_user = super::acting_user(&headers);
    let response = state
        .services
        .expenses
        .create_expense(request, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    responses((status = 200, description = "Expenses listed for the company")),
    tag = "expenses"
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<PaginatedResponse<expense::Model>> {
    let (items, total) = state
        .services
        .expenses
        .list_expenses(query.company_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::paged(
        items, total, query.page, query.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses/{id}",
    responses(
        (status = 200, description = "Expense with its lines"),
        (status = 404, description = "Expense not found", body = crate::errors::ErrorResponse)
    ),
    tag = "expenses"
)]
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ExpenseResponse> {
    let response = state.services.expenses.get_expense(id).await?;
    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{id}",
    responses(
        (status = 200, description = "Expense deleted; all line quantities returned to stock"),
        (status = 404, description = "Expense not found", body = crate::errors::ErrorResponse)
    ),
    tag = "expenses"
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> ApiResult<()> {
    let acting_user = super::acting_user(&headers);
    state
        .services
        .expenses
        .delete_expense(id, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    put,
    path = "/api/v1/expenses/{id}/items/{inventory_item_id}",
    request_body = ExpenseItemQuantityRequest,
    responses(
        (status = 200, description = "Line created or edited; only the net quantity change hit the stock"),
        (status = 422, description = "Insufficient stock for the increase", body = crate::errors::ErrorResponse)
    ),
    tag = "expenses"
)]
pub async fn apply_expense_item(
    State(state): State<AppState>,
    Path((id, inventory_item_id)): Path<(i32, i32)>,
    headers: HeaderMap,
    Json(request): Json<ExpenseItemQuantityRequest>,
) -> ApiResult<inventory_item::Model> {
    let acting_user = super::acting_user(&headers);
    let model = state
        .services
        .expenses
        .apply_expense_item(id, inventory_item_id, request.quantity, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{id}/items/{inventory_item_id}",
    responses(
        (status = 200, description = "Line removed; its quantity returned to stock"),
        (status = 404, description = "Line not found", body = crate::errors::ErrorResponse)
    ),
    tag = "expenses"
)]
pub async fn remove_expense_item(
    State(state): State<AppState>,
    Path((id, inventory_item_id)): Path<(i32, i32)>,
    headers: HeaderMap,
) -> ApiResult<()> {
    let acting_user = super::acting_user(&headers);
    state
        .services
        .expenses
        .remove_expense_item(id, inventory_item_id, acting_user)
        .await?;
    Ok(Json(ApiResponse::success(())))
}
