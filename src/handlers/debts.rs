use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::debt::Model as DebtModel,
    entities::debt_payment::Model as DebtPaymentModel,
    services::debts::{CreateDebtRequest, DebtListResponse, RecordDebtPaymentRequest},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct DebtListQuery {
    pub status: Option<String>,
    pub debt_type: Option<String>,
    #[serde(default = "crate::handlers::ledger::default_page")]
    pub page: u64,
    #[serde(default = "crate::handlers::ledger::default_limit")]
    pub limit: u64,
}

pub async fn create_debt(
    State(state): State<AppState>,
    Json(request): Json<CreateDebtRequest>,
) -> ApiResult<DebtModel> {
    let debt = state.services.debts.create_debt(request).await?;
    Ok(Json(ApiResponse::success(debt)))
}

pub async fn get_debt(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<DebtModel> {
    let debt = state.services.debts.get_debt(id).await?;
    Ok(Json(ApiResponse::success(debt)))
}

pub async fn list_debts(
    State(state): State<AppState>,
    Query(query): Query<DebtListQuery>,
) -> ApiResult<DebtListResponse> {
    let list = state
        .services
        .debts
        .list_debts(query.status, query.debt_type, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(list)))
}

pub async fn list_debt_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<DebtPaymentModel>> {
    let payments = state.services.debts.list_payments(id).await?;
    Ok(Json(ApiResponse::success(payments)))
}

/// Records a payment and re-derives the debt status from its payments.
#[utoipa::path(
    post,
    path = "/api/v1/debts/{id}/payments",
    params(("id" = Uuid, Path, description = "Debt id")),
    request_body = RecordDebtPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded, debt status re-derived"),
        (status = 404, description = "Debt not found"),
        (status = 409, description = "Debt already fully paid"),
        (status = 422, description = "Debt is cancelled")
    ),
    tag = "debts"
)]
pub async fn record_debt_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordDebtPaymentRequest>,
) -> ApiResult<DebtModel> {
    let debt = state.services.debts.record_payment(id, request).await?;
    Ok(Json(ApiResponse::success(debt)))
}

pub async fn mark_debt_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<DebtModel> {
    let debt = state.services.debts.mark_paid(id).await?;
    Ok(Json(ApiResponse::message(debt, "debt marked as paid")))
}

pub async fn cancel_debt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<DebtModel> {
    let debt = state.services.debts.cancel(id).await?;
    Ok(Json(ApiResponse::message(debt, "debt cancelled")))
}
