use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::user::Model as UserModel,
    services::users::{
        ActivityListResponse, CreateUserRequest, LogActivityRequest, UpdateUserRequest,
    },
    entities::user_activity::Model as ActivityModel,
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct ActivityListQuery {
    #[serde(default = "crate::handlers::ledger::default_page")]
    pub page: u64,
    #[serde(default = "crate::handlers::ledger::default_limit")]
    pub limit: u64,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<UserModel> {
    let user = state.services.users.create_user(request).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<UserModel> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Vec<UserModel>> {
    let users = state.services.users.list_users(query.include_inactive).await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserModel> {
    let user = state.services.users.update_user(id, request).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn log_user_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LogActivityRequest>,
) -> ApiResult<ActivityModel> {
    let activity = state.services.users.log_activity(id, request).await?;
    Ok(Json(ApiResponse::success(activity)))
}

pub async fn list_user_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ActivityListQuery>,
) -> ApiResult<ActivityListResponse> {
    let activity = state
        .services
        .users
        .list_activity(id, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(activity)))
}
