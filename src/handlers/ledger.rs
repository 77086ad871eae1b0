use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::account::Model as AccountModel,
    entities::category::Model as CategoryModel,
    entities::transaction::Model as TransactionModel,
    services::ledger::{
        CreateAccountRequest, CreateCategoryRequest, RecordTransactionRequest,
        TransactionListResponse, UpdateAccountRequest,
    },
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct AccountListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    pub category_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionListQuery {
    pub account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    #[serde(default = "crate::handlers::ledger::default_page")]
    pub page: u64,
    #[serde(default = "crate::handlers::ledger::default_limit")]
    pub limit: u64,
}

pub(crate) fn default_page() -> u64 {
    1
}
pub(crate) fn default_limit() -> u64 {
    20
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> ApiResult<AccountModel> {
    let account = state.services.ledger.create_account(request).await?;
    Ok(Json(ApiResponse::success(account)))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AccountModel> {
    let account = state.services.ledger.get_account(id).await?;
    Ok(Json(ApiResponse::success(account)))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<AccountListQuery>,
) -> ApiResult<Vec<AccountModel>> {
    let accounts = state
        .services
        .ledger
        .list_accounts(query.include_inactive)
        .await?;
    Ok(Json(ApiResponse::success(accounts)))
}

pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAccountRequest>,
) -> ApiResult<AccountModel> {
    let account = state.services.ledger.update_account(id, request).await?;
    Ok(Json(ApiResponse::success(account)))
}

/// Bulk repair action: rebuild one account's balance from its ledger.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/recalculate",
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Balance recomputed from the transaction history"),
        (status = 404, description = "Account not found")
    ),
    tag = "ledger"
)]
pub async fn recalculate_balance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AccountModel> {
    let account = state.services.ledger.recalculate_balance(id).await?;
    Ok(Json(ApiResponse::message(account, "balance recalculated")))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<CategoryModel> {
    let category = state.services.ledger.create_category(request).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> ApiResult<Vec<CategoryModel>> {
    let categories = state
        .services
        .ledger
        .list_categories(query.category_type)
        .await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// Records a ledger transaction; balances update in the same database
/// transaction.
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = RecordTransactionRequest,
    responses(
        (status = 200, description = "Transaction recorded and balances updated"),
        (status = 400, description = "Unknown type or malformed amount"),
        (status = 404, description = "Account not found")
    ),
    tag = "ledger"
)]
pub async fn record_transaction(
    State(state): State<AppState>,
    Json(request): Json<RecordTransactionRequest>,
) -> ApiResult<TransactionModel> {
    let transaction = state.services.ledger.record_transaction(request).await?;
    Ok(Json(ApiResponse::success(transaction)))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<TransactionModel> {
    let transaction = state.services.ledger.get_transaction(id).await?;
    Ok(Json(ApiResponse::success(transaction)))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> ApiResult<TransactionListResponse> {
    let list = state
        .services
        .ledger
        .list_transactions(query.account_id, query.category_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(list)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state.services.ledger.delete_transaction(id).await?;
    Ok(Json(ApiResponse::message((), "transaction deleted")))
}
