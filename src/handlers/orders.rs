use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::order::Model as OrderModel,
    entities::order_history::Model as HistoryModel,
    services::orders::{
        CreateOrderRequest, OrderDetailResponse, OrderItemLine, OrderListResponse,
        SetOrderStatusRequest,
    },
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    #[serde(default = "crate::handlers::ledger::default_page")]
    pub page: u64,
    #[serde(default = "crate::handlers::ledger::default_limit")]
    pub limit: u64,
}

#[derive(Debug, Deserialize)]
pub struct CancelOrderRequest {
    pub reason: Option<String>,
    pub changed_by: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MarkOrderRequest {
    pub changed_by: Option<Uuid>,
}

/// Creates an order in draft with its line items; the stored total is
/// computed from the lines plus shipping.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created in draft"),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "A line references an unknown product")
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<OrderDetailResponse> {
    let order = state.services.orders.create_order(request).await?;
    Ok(Json(ApiResponse::success(order)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with line items"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<OrderDetailResponse> {
    let order = state.services.orders.get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<OrderListResponse> {
    let list = state
        .services
        .orders
        .list_orders(query.status, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(list)))
}

pub async fn add_order_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(line): Json<OrderItemLine>,
) -> ApiResult<OrderDetailResponse> {
    let order = state.services.orders.add_item(id, line).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn remove_order_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<OrderDetailResponse> {
    let order = state.services.orders.remove_item(id, item_id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Moves an order along the status table; invalid jumps are rejected.
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = SetOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed, history row written"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Transition not allowed")
    ),
    tag = "orders"
)]
pub async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetOrderStatusRequest>,
) -> ApiResult<OrderModel> {
    let order = state.services.orders.set_status(id, request).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn mark_order_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MarkOrderRequest>,
) -> ApiResult<OrderModel> {
    let order = state.services.orders.mark_paid(id, request.changed_by).await?;
    Ok(Json(ApiResponse::message(order, "order marked as paid")))
}

pub async fn mark_order_shipped(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MarkOrderRequest>,
) -> ApiResult<OrderModel> {
    let order = state
        .services
        .orders
        .mark_shipped(id, request.changed_by)
        .await?;
    Ok(Json(ApiResponse::message(order, "order marked as shipped")))
}

pub async fn mark_order_delivered(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MarkOrderRequest>,
) -> ApiResult<OrderModel> {
    let order = state
        .services
        .orders
        .mark_delivered(id, request.changed_by)
        .await?;
    Ok(Json(ApiResponse::message(order, "order marked as delivered")))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelOrderRequest>,
) -> ApiResult<OrderModel> {
    let order = state
        .services
        .orders
        .cancel(id, request.reason, request.changed_by)
        .await?;
    Ok(Json(ApiResponse::message(order, "order cancelled")))
}

pub async fn recalculate_order_total(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<OrderModel> {
    let order = state.services.orders.recalculate_total(id).await?;
    Ok(Json(ApiResponse::message(order, "total recalculated")))
}

pub async fn order_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<HistoryModel>> {
    let history = state.services.orders.history(id).await?;
    Ok(Json(ApiResponse::success(history)))
}
