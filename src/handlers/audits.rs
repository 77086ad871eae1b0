use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::stock_audit::Model as AuditModel,
    entities::stock_count::Model as CountModel,
    services::audits::{CreateAuditRequest, DiscrepancyLine, RecordCountRequest},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct AuditListQuery {
    pub warehouse_id: Option<Uuid>,
    pub status: Option<String>,
}

pub async fn create_audit(
    State(state): State<AppState>,
    Json(request): Json<CreateAuditRequest>,
) -> ApiResult<AuditModel> {
    let audit = state.services.audits.create_audit(request).await?;
    Ok(Json(ApiResponse::success(audit)))
}

pub async fn get_audit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AuditModel> {
    let audit = state.services.audits.get_audit(id).await?;
    Ok(Json(ApiResponse::success(audit)))
}

pub async fn list_audits(
    State(state): State<AppState>,
    Query(query): Query<AuditListQuery>,
) -> ApiResult<Vec<AuditModel>> {
    let audits = state
        .services
        .audits
        .list_audits(query.warehouse_id, query.status)
        .await?;
    Ok(Json(ApiResponse::success(audits)))
}

pub async fn start_audit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AuditModel> {
    let audit = state.services.audits.start(id).await?;
    Ok(Json(ApiResponse::message(audit, "audit started")))
}

pub async fn complete_audit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AuditModel> {
    let audit = state.services.audits.complete(id).await?;
    Ok(Json(ApiResponse::message(audit, "audit completed")))
}

pub async fn cancel_audit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AuditModel> {
    let audit = state.services.audits.cancel(id).await?;
    Ok(Json(ApiResponse::message(audit, "audit cancelled")))
}

pub async fn record_count(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordCountRequest>,
) -> ApiResult<CountModel> {
    let count = state.services.audits.record_count(id, request).await?;
    Ok(Json(ApiResponse::success(count)))
}

pub async fn list_counts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<CountModel>> {
    let counts = state.services.audits.list_counts(id).await?;
    Ok(Json(ApiResponse::success(counts)))
}

pub async fn list_discrepancies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<DiscrepancyLine>> {
    let lines = state.services.audits.discrepancies(id).await?;
    Ok(Json(ApiResponse::success(lines)))
}
