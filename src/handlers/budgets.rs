use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::budget::Model as BudgetModel,
    services::budgets::{BudgetPerformance, CreateBudgetRequest, SetBudgetCategoryRequest},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct BudgetListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn create_budget(
    State(state): State<AppState>,
    Json(request): Json<CreateBudgetRequest>,
) -> ApiResult<BudgetModel> {
    let budget = state.services.budgets.create_budget(request).await?;
    Ok(Json(ApiResponse::success(budget)))
}

pub async fn get_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<BudgetModel> {
    let budget = state.services.budgets.get_budget(id).await?;
    Ok(Json(ApiResponse::success(budget)))
}

pub async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<BudgetListQuery>,
) -> ApiResult<Vec<BudgetModel>> {
    let budgets = state
        .services
        .budgets
        .list_budgets(query.include_inactive)
        .await?;
    Ok(Json(ApiResponse::success(budgets)))
}

pub async fn set_budget_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetBudgetCategoryRequest>,
) -> ApiResult<()> {
    state.services.budgets.set_category_amount(id, request).await?;
    Ok(Json(ApiResponse::message((), "category line saved")))
}

pub async fn deactivate_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<BudgetModel> {
    let budget = state.services.budgets.deactivate(id).await?;
    Ok(Json(ApiResponse::message(budget, "budget deactivated")))
}

/// Planned vs. actual figures over the budget window.
#[utoipa::path(
    get,
    path = "/api/v1/budgets/{id}/performance",
    params(("id" = Uuid, Path, description = "Budget id")),
    responses(
        (status = 200, description = "Actuals computed from the ledger at read time"),
        (status = 404, description = "Budget not found")
    ),
    tag = "budgets"
)]
pub async fn budget_performance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<BudgetPerformance> {
    let performance = state.services.budgets.performance(id).await?;
    Ok(Json(ApiResponse::success(performance)))
}
