use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::dashboard::Model as DashboardModel,
    entities::report::Model as ReportModel,
    entities::report_template::Model as TemplateModel,
    entities::scheduled_report::Model as ScheduleModel,
    services::reports::{
        CreateDashboardRequest, CreateReportRequest, CreateScheduleRequest, CreateTemplateRequest,
    },
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardListQuery {
    pub owner_id: Option<Uuid>,
}

pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> ApiResult<TemplateModel> {
    let template = state.services.reports.create_template(request).await?;
    Ok(Json(ApiResponse::success(template)))
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<TemplateModel> {
    let template = state.services.reports.get_template(id).await?;
    Ok(Json(ApiResponse::success(template)))
}

pub async fn list_templates(State(state): State<AppState>) -> ApiResult<Vec<TemplateModel>> {
    let templates = state.services.reports.list_templates().await?;
    Ok(Json(ApiResponse::success(templates)))
}

pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<CreateReportRequest>,
) -> ApiResult<ReportModel> {
    let report = state.services.reports.create_report(request).await?;
    Ok(Json(ApiResponse::success(report)))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ReportModel> {
    let report = state.services.reports.get_report(id).await?;
    Ok(Json(ApiResponse::success(report)))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportListQuery>,
) -> ApiResult<Vec<ReportModel>> {
    let reports = state.services.reports.list_reports(query.template_id).await?;
    Ok(Json(ApiResponse::success(reports)))
}

/// Always fails: generation is not wired to an engine.
pub async fn generate_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ReportModel> {
    let report = state.services.reports.generate_report(id).await?;
    Ok(Json(ApiResponse::success(report)))
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> ApiResult<ScheduleModel> {
    let schedule = state.services.reports.create_schedule(request).await?;
    Ok(Json(ApiResponse::success(schedule)))
}

pub async fn list_schedules(State(state): State<AppState>) -> ApiResult<Vec<ScheduleModel>> {
    let schedules = state.services.reports.list_schedules().await?;
    Ok(Json(ApiResponse::success(schedules)))
}

pub async fn activate_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ScheduleModel> {
    let schedule = state.services.reports.set_schedule_active(id, true).await?;
    Ok(Json(ApiResponse::message(schedule, "schedule activated")))
}

pub async fn deactivate_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ScheduleModel> {
    let schedule = state.services.reports.set_schedule_active(id, false).await?;
    Ok(Json(ApiResponse::message(schedule, "schedule deactivated")))
}

pub async fn create_dashboard(
    State(state): State<AppState>,
    Json(request): Json<CreateDashboardRequest>,
) -> ApiResult<DashboardModel> {
    let dashboard = state.services.reports.create_dashboard(request).await?;
    Ok(Json(ApiResponse::success(dashboard)))
}

pub async fn list_dashboards(
    State(state): State<AppState>,
    Query(query): Query<DashboardListQuery>,
) -> ApiResult<Vec<DashboardModel>> {
    let dashboards = state.services.reports.list_dashboards(query.owner_id).await?;
    Ok(Json(ApiResponse::success(dashboards)))
}

pub async fn delete_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state.services.reports.delete_dashboard(id).await?;
    Ok(Json(ApiResponse::message((), "dashboard deleted")))
}
