use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::tracking_company::Model as CompanyModel,
    entities::tracking_history::Model as TrackHistoryModel,
    entities::tracking_notification::Model as NotificationModel,
    entities::tracking_number::Model as TrackingModel,
    services::tracking::{
        CreateTrackingCompanyRequest, CreateTrackingNumberRequest, UpdateTrackingStatusRequest,
    },
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct TrackingListQuery {
    pub status: Option<String>,
    pub order_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub unread_only: bool,
}

pub async fn create_tracking_company(
    State(state): State<AppState>,
    Json(request): Json<CreateTrackingCompanyRequest>,
) -> ApiResult<CompanyModel> {
    let company = state.services.tracking.create_company(request).await?;
    Ok(Json(ApiResponse::success(company)))
}

pub async fn list_tracking_companies(State(state): State<AppState>) -> ApiResult<Vec<CompanyModel>> {
    let companies = state.services.tracking.list_companies().await?;
    Ok(Json(ApiResponse::success(companies)))
}

pub async fn create_tracking_number(
    State(state): State<AppState>,
    Json(request): Json<CreateTrackingNumberRequest>,
) -> ApiResult<TrackingModel> {
    let tracking = state
        .services
        .tracking
        .create_tracking_number(request)
        .await?;
    Ok(Json(ApiResponse::success(tracking)))
}

pub async fn get_tracking_number(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<TrackingModel> {
    let tracking = state.services.tracking.get_tracking_number(id).await?;
    Ok(Json(ApiResponse::success(tracking)))
}

pub async fn list_tracking_numbers(
    State(state): State<AppState>,
    Query(query): Query<TrackingListQuery>,
) -> ApiResult<Vec<TrackingModel>> {
    let list = state
        .services
        .tracking
        .list_tracking_numbers(query.status, query.order_id)
        .await?;
    Ok(Json(ApiResponse::success(list)))
}

pub async fn list_problematic(State(state): State<AppState>) -> ApiResult<Vec<TrackingModel>> {
    let list = state.services.tracking.list_problematic().await?;
    Ok(Json(ApiResponse::success(list)))
}

/// Applies a carrier-reported status; any known status may follow any
/// other.
#[utoipa::path(
    put,
    path = "/api/v1/tracking/{id}/status",
    params(("id" = Uuid, Path, description = "Tracking number id")),
    request_body = UpdateTrackingStatusRequest,
    responses(
        (status = 200, description = "Status applied, history and notification written"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Tracking number not found")
    ),
    tag = "tracking"
)]
pub async fn update_tracking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTrackingStatusRequest>,
) -> ApiResult<TrackingModel> {
    let tracking = state.services.tracking.update_status(id, request).await?;
    Ok(Json(ApiResponse::success(tracking)))
}

pub async fn archive_tracking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<TrackingModel> {
    let tracking = state.services.tracking.archive(id).await?;
    Ok(Json(ApiResponse::message(tracking, "shipment archived")))
}

pub async fn mark_tracking_problematic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<TrackingModel> {
    let tracking = state.services.tracking.mark_problematic(id).await?;
    Ok(Json(ApiResponse::message(tracking, "shipment flagged as problematic")))
}

pub async fn mark_tracking_delivered(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<TrackingModel> {
    let tracking = state.services.tracking.mark_delivered(id).await?;
    Ok(Json(ApiResponse::message(tracking, "shipment marked as delivered")))
}

pub async fn tracking_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<TrackHistoryModel>> {
    let history = state.services.tracking.history(id).await?;
    Ok(Json(ApiResponse::success(history)))
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> ApiResult<Vec<NotificationModel>> {
    let notifications = state
        .services
        .tracking
        .list_notifications(query.user_id, query.unread_only)
        .await?;
    Ok(Json(ApiResponse::success(notifications)))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<NotificationModel> {
    let notification = state
        .services
        .tracking
        .set_notification_read(id, true)
        .await?;
    Ok(Json(ApiResponse::success(notification)))
}

pub async fn mark_notification_unread(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<NotificationModel> {
    let notification = state
        .services
        .tracking
        .set_notification_read(id, false)
        .await?;
    Ok(Json(ApiResponse::success(notification)))
}
