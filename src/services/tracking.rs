use crate::{
    db::DbPool,
    entities::order::Entity as OrderEntity,
    entities::tracking_company::{
        self, ActiveModel as CompanyActiveModel, Entity as CompanyEntity, Model as CompanyModel,
    },
    entities::tracking_history::{
        self, ActiveModel as TrackHistoryActiveModel, Entity as TrackHistoryEntity,
        Model as TrackHistoryModel,
    },
    entities::tracking_notification::{
        self, ActiveModel as NotificationActiveModel, Entity as NotificationEntity,
        Model as NotificationModel,
    },
    entities::tracking_number::{
        self, ActiveModel as TrackingActiveModel, Entity as TrackingEntity,
        Model as TrackingModel, TrackingStatus,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTrackingCompanyRequest {
    #[validate(length(min = 1, message = "Carrier name is required"))]
    pub name: String,
    pub code: Option<String>,
    pub website: Option<String>,
    pub tracking_url_template: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTrackingNumberRequest {
    #[validate(length(min = 1, message = "Tracking number is required"))]
    pub tracking_number: String,
    pub company_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTrackingStatusRequest {
    pub status: String,
    pub location: Option<String>,
    pub comment: Option<String>,
    pub changed_by: Option<Uuid>,
}

/// Shipment tracking. Carriers report out of order, so any known status
/// may follow any other; each change appends history and queues a
/// notification for the shipment's owner.
#[derive(Clone)]
pub struct TrackingService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl TrackingService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_company(
        &self,
        request: CreateTrackingCompanyRequest,
    ) -> Result<CompanyModel, ServiceError> {
        request.validate()?;

        let model = CompanyActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            code: Set(request.code),
            website: Set(request.website),
            tracking_url_template: Set(request.tracking_url_template),
            phone: Set(request.phone),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(company_id = %model.id, "tracking company created");
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list_companies(&self) -> Result<Vec<CompanyModel>, ServiceError> {
        Ok(CompanyEntity::find()
            .filter(tracking_company::Column::IsActive.eq(true))
            .order_by_asc(tracking_company::Column::Name)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, request), fields(tracking_number = %request.tracking_number))]
    pub async fn create_tracking_number(
        &self,
        request: CreateTrackingNumberRequest,
    ) -> Result<TrackingModel, ServiceError> {
        request.validate()?;

        if let Some(company_id) = request.company_id {
            CompanyEntity::find_by_id(company_id)
                .one(&*self.db_pool)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("tracking company {} not found", company_id))
                })?;
        }
        if let Some(order_id) = request.order_id {
            OrderEntity::find_by_id(order_id)
                .one(&*self.db_pool)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("order {} not found", order_id)))?;
        }

        let clash = TrackingEntity::find()
            .filter(tracking_number::Column::TrackingNumber.eq(request.tracking_number.clone()))
            .one(&*self.db_pool)
            .await?;
        if clash.is_some() {
            return Err(ServiceError::Conflict(format!(
                "tracking number {} already exists",
                request.tracking_number
            )));
        }

        let model = TrackingActiveModel {
            id: Set(Uuid::new_v4()),
            tracking_number: Set(request.tracking_number),
            company_id: Set(request.company_id),
            order_id: Set(request.order_id),
            status: Set(TrackingStatus::Pending.as_str().to_string()),
            description: Set(request.description),
            shipped_date: Set(None),
            delivered_date: Set(None),
            is_archived: Set(false),
            is_problematic: Set(false),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(tracking_id = %model.id, "tracking number created");
        Ok(model)
    }

    #[instrument(skip(self), fields(tracking_id = %tracking_id))]
    pub async fn get_tracking_number(&self, tracking_id: Uuid) -> Result<TrackingModel, ServiceError> {
        TrackingEntity::find_by_id(tracking_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("tracking number {} not found", tracking_id))
            })
    }

    #[instrument(skip(self))]
    pub async fn list_tracking_numbers(
        &self,
        status: Option<String>,
        order_id: Option<Uuid>,
    ) -> Result<Vec<TrackingModel>, ServiceError> {
        let mut query = TrackingEntity::find().order_by_desc(tracking_number::Column::CreatedAt);
        if let Some(status) = status {
            let status = TrackingStatus::from_str(&status).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown tracking status: {}", status))
            })?;
            query = query.filter(tracking_number::Column::Status.eq(status.as_str()));
        }
        if let Some(order_id) = order_id {
            query = query.filter(tracking_number::Column::OrderId.eq(order_id));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    /// Shipments an operator has flagged for follow-up.
    #[instrument(skip(self))]
    pub async fn list_problematic(&self) -> Result<Vec<TrackingModel>, ServiceError> {
        Ok(TrackingEntity::find()
            .filter(tracking_number::Column::IsProblematic.eq(true))
            .order_by_desc(tracking_number::Column::UpdatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    /// Applies a carrier-reported status. Shipped and delivered dates are
    /// stamped the first time the shipment reaches those states; the
    /// history row and owner notification are written in the same
    /// transaction.
    #[instrument(skip(self, request), fields(tracking_id = %tracking_id, new_status = %request.status))]
    pub async fn update_status(
        &self,
        tracking_id: Uuid,
        request: UpdateTrackingStatusRequest,
    ) -> Result<TrackingModel, ServiceError> {
        let next = TrackingStatus::from_str(&request.status).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown tracking status: {}", request.status))
        })?;

        let txn = self.db_pool.begin().await?;

        let tracking = TrackingEntity::find_by_id(tracking_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("tracking number {} not found", tracking_id))
            })?;

        let old_status = tracking.status.clone();
        if old_status == next.as_str() {
            txn.commit().await?;
            return Ok(tracking);
        }

        let number = tracking.tracking_number.clone();
        let owner = tracking.created_by;
        let shipped_date = tracking.shipped_date;
        let delivered_date = tracking.delivered_date;
        let now = Utc::now();

        let mut active: TrackingActiveModel = tracking.into();
        active.status = Set(next.as_str().to_string());
        match next {
            TrackingStatus::Shipped if shipped_date.is_none() => {
                active.shipped_date = Set(Some(now))
            }
            TrackingStatus::Delivered if delivered_date.is_none() => {
                active.delivered_date = Set(Some(now))
            }
            _ => {}
        }
        let updated = active.update(&txn).await?;

        TrackHistoryActiveModel {
            id: Set(Uuid::new_v4()),
            tracking_number_id: Set(tracking_id),
            old_status: Set(Some(old_status.clone())),
            new_status: Set(next.as_str().to_string()),
            location: Set(request.location),
            comment: Set(request.comment),
            changed_by: Set(request.changed_by),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut notification_id = None;
        if let Some(owner) = owner {
            let notification = NotificationActiveModel {
                id: Set(Uuid::new_v4()),
                tracking_number_id: Set(tracking_id),
                user_id: Set(Some(owner)),
                message: Set(format!("Shipment {} is now {}", number, next.as_str())),
                is_read: Set(false),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            notification_id = Some((notification.id, owner));
        }

        txn.commit().await?;

        info!(tracking_id = %tracking_id, old_status = %old_status, new_status = %updated.status, "tracking status changed");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::TrackingStatusChanged {
                    tracking_id,
                    old_status,
                    new_status: updated.status.clone(),
                })
                .await
            {
                warn!(error = %e, "failed to send tracking status event");
            }
            if let Some((notification_id, user_id)) = notification_id {
                if let Err(e) = sender
                    .send(Event::TrackingNotificationCreated {
                        notification_id,
                        tracking_id,
                        user_id,
                    })
                    .await
                {
                    warn!(error = %e, "failed to send notification event");
                }
            }
        }

        Ok(updated)
    }

    /// Bulk action: park a shipment out of the active views. The carrier
    /// status is left untouched.
    #[instrument(skip(self), fields(tracking_id = %tracking_id))]
    pub async fn archive(&self, tracking_id: Uuid) -> Result<TrackingModel, ServiceError> {
        let tracking = self.get_tracking_number(tracking_id).await?;
        let mut active: TrackingActiveModel = tracking.into();
        active.is_archived = Set(true);
        let model = active.update(&*self.db_pool).await?;
        info!(tracking_id = %tracking_id, "tracking number archived");
        Ok(model)
    }

    /// Bulk action: flag a shipment for operator follow-up.
    #[instrument(skip(self), fields(tracking_id = %tracking_id))]
    pub async fn mark_problematic(&self, tracking_id: Uuid) -> Result<TrackingModel, ServiceError> {
        let tracking = self.get_tracking_number(tracking_id).await?;
        let mut active: TrackingActiveModel = tracking.into();
        active.is_problematic = Set(true);
        let model = active.update(&*self.db_pool).await?;
        info!(tracking_id = %tracking_id, "tracking number flagged problematic");
        Ok(model)
    }

    #[instrument(skip(self), fields(tracking_id = %tracking_id))]
    pub async fn mark_delivered(&self, tracking_id: Uuid) -> Result<TrackingModel, ServiceError> {
        self.update_status(
            tracking_id,
            UpdateTrackingStatusRequest {
                status: TrackingStatus::Delivered.as_str().to_string(),
                location: None,
                comment: None,
                changed_by: None,
            },
        )
        .await
    }

    #[instrument(skip(self), fields(tracking_id = %tracking_id))]
    pub async fn history(&self, tracking_id: Uuid) -> Result<Vec<TrackHistoryModel>, ServiceError> {
        self.get_tracking_number(tracking_id).await?;
        Ok(TrackHistoryEntity::find()
            .filter(tracking_history::Column::TrackingNumberId.eq(tracking_id))
            .order_by_asc(tracking_history::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_notifications(
        &self,
        user_id: Option<Uuid>,
        unread_only: bool,
    ) -> Result<Vec<NotificationModel>, ServiceError> {
        let mut query =
            NotificationEntity::find().order_by_desc(tracking_notification::Column::CreatedAt);
        if let Some(user_id) = user_id {
            query = query.filter(tracking_notification::Column::UserId.eq(user_id));
        }
        if unread_only {
            query = query.filter(tracking_notification::Column::IsRead.eq(false));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    #[instrument(skip(self), fields(notification_id = %notification_id))]
    pub async fn set_notification_read(
        &self,
        notification_id: Uuid,
        is_read: bool,
    ) -> Result<NotificationModel, ServiceError> {
        let notification = NotificationEntity::find_by_id(notification_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("notification {} not found", notification_id))
            })?;

        let mut active: NotificationActiveModel = notification.into();
        active.is_read = Set(is_read);
        Ok(active.update(&*self.db_pool).await?)
    }
}
