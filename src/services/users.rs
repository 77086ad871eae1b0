use crate::{
    db::DbPool,
    entities::user::{
        self, ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel, UserRole,
    },
    entities::user_activity::{
        self, ActiveModel as ActivityActiveModel, Entity as ActivityEntity,
        Model as ActivityModel,
    },
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub role: String,
    pub telegram_id: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub role: Option<String>,
    pub telegram_id: Option<String>,
    pub phone_number: Option<String>,
    pub is_verified: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LogActivityRequest {
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
    pub ip_address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityListResponse {
    pub activity: Vec<ActivityModel>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Back-office identities and their activity trail.
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserModel, ServiceError> {
        request.validate()?;

        let role = UserRole::from_str(&request.role).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown user role: {}", request.role))
        })?;

        let clash = UserEntity::find()
            .filter(user::Column::Username.eq(request.username.clone()))
            .one(&*self.db_pool)
            .await?;
        if clash.is_some() {
            return Err(ServiceError::Conflict(format!(
                "username {} is already taken",
                request.username
            )));
        }

        let model = UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(request.username),
            email: Set(request.email),
            role: Set(role.as_str().to_string()),
            telegram_id: Set(request.telegram_id),
            phone_number: Set(request.phone_number),
            is_verified: Set(false),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(user_id = %model.id, "user created");
        Ok(model)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_user(&self, user_id: Uuid) -> Result<UserModel, ServiceError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {} not found", user_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, include_inactive: bool) -> Result<Vec<UserModel>, ServiceError> {
        let mut query = UserEntity::find().order_by_asc(user::Column::Username);
        if !include_inactive {
            query = query.filter(user::Column::IsActive.eq(true));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn update_user(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserModel, ServiceError> {
        request.validate()?;

        let user = self.get_user(user_id).await?;
        let mut active: UserActiveModel = user.into();

        if let Some(role) = request.role {
            let role = UserRole::from_str(&role).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown user role: {}", role))
            })?;
            active.role = Set(role.as_str().to_string());
        }
        if let Some(email) = request.email {
            active.email = Set(Some(email));
        }
        if let Some(telegram_id) = request.telegram_id {
            active.telegram_id = Set(Some(telegram_id));
        }
        if let Some(phone_number) = request.phone_number {
            active.phone_number = Set(Some(phone_number));
        }
        if let Some(is_verified) = request.is_verified {
            active.is_verified = Set(is_verified);
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }

        Ok(active.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self, request), fields(user_id = %user_id, action = %request.action))]
    pub async fn log_activity(
        &self,
        user_id: Uuid,
        request: LogActivityRequest,
    ) -> Result<ActivityModel, ServiceError> {
        request.validate()?;
        self.get_user(user_id).await?;

        Ok(ActivityActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            action: Set(request.action),
            ip_address: Set(request.ip_address),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_activity(
        &self,
        user_id: Uuid,
        page: u64,
        per_page: u64,
    ) -> Result<ActivityListResponse, ServiceError> {
        self.get_user(user_id).await?;

        let paginator = ActivityEntity::find()
            .filter(user_activity::Column::UserId.eq(user_id))
            .order_by_desc(user_activity::Column::Timestamp)
            .paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let activity = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(ActivityListResponse {
            activity,
            total,
            page,
            per_page,
        })
    }
}
