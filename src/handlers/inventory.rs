use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::inventory_item::Model as ItemModel,
    entities::inventory_movement::Model as MovementModel,
    entities::warehouse::Model as WarehouseModel,
    services::inventory::{CreateWarehouseRequest, MovementListResponse, RecordMovementRequest},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct StockListQuery {
    pub warehouse_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MovementListQuery {
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
    #[serde(default = "crate::handlers::ledger::default_page")]
    pub page: u64,
    #[serde(default = "crate::handlers::ledger::default_limit")]
    pub limit: u64,
}

pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(request): Json<CreateWarehouseRequest>,
) -> ApiResult<WarehouseModel> {
    let warehouse = state.services.inventory.create_warehouse(request).await?;
    Ok(Json(ApiResponse::success(warehouse)))
}

pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<WarehouseModel> {
    let warehouse = state.services.inventory.get_warehouse(id).await?;
    Ok(Json(ApiResponse::success(warehouse)))
}

pub async fn list_warehouses(State(state): State<AppState>) -> ApiResult<Vec<WarehouseModel>> {
    let warehouses = state.services.inventory.list_warehouses().await?;
    Ok(Json(ApiResponse::success(warehouses)))
}

pub async fn list_stock(
    State(state): State<AppState>,
    Query(query): Query<StockListQuery>,
) -> ApiResult<Vec<ItemModel>> {
    let stock = state
        .services
        .inventory
        .list_stock(query.warehouse_id, query.product_id)
        .await?;
    Ok(Json(ApiResponse::success(stock)))
}

pub async fn get_stock_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ItemModel> {
    let item = state.services.inventory.get_stock_item(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn reserve_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<MovementModel> {
    let movement = state.services.inventory.reserve_one(id).await?;
    Ok(Json(ApiResponse::message(movement, "one unit reserved")))
}

pub async fn release_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<MovementModel> {
    let movement = state.services.inventory.release_one(id).await?;
    Ok(Json(ApiResponse::message(movement, "one unit released")))
}

/// Records a typed stock movement. The movement row and the quantity
/// change commit or roll back together.
#[utoipa::path(
    post,
    path = "/api/v1/movements",
    request_body = RecordMovementRequest,
    responses(
        (status = 200, description = "Movement recorded and stock updated"),
        (status = 400, description = "Unknown movement type or malformed quantity"),
        (status = 404, description = "Product or warehouse not found"),
        (status = 422, description = "Insufficient stock or reserved quantity")
    ),
    tag = "inventory"
)]
pub async fn record_movement(
    State(state): State<AppState>,
    Json(request): Json<RecordMovementRequest>,
) -> ApiResult<MovementModel> {
    let movement = state.services.inventory.record_movement(request).await?;
    Ok(Json(ApiResponse::success(movement)))
}

pub async fn list_movements(
    State(state): State<AppState>,
    Query(query): Query<MovementListQuery>,
) -> ApiResult<MovementListResponse> {
    let list = state
        .services
        .inventory
        .list_movements(query.product_id, query.warehouse_id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(list)))
}
