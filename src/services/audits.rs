use crate::{
    db::DbPool,
    entities::inventory_item,
    entities::inventory_item::Entity as ItemEntity,
    entities::product::Entity as ProductEntity,
    entities::stock_audit::{
        self, ActiveModel as AuditActiveModel, AuditStatus, Entity as AuditEntity,
        Model as AuditModel,
    },
    entities::stock_count::{
        self, ActiveModel as CountActiveModel, Entity as CountEntity, Model as CountModel,
    },
    entities::warehouse::Entity as WarehouseEntity,
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
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateAuditRequest {
    pub warehouse_id: Uuid,
    #[validate(length(min = 1, message = "Audit number is required"))]
    pub audit_number: String,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordCountRequest {
    pub product_id: Uuid,
    pub actual_quantity: i32,
    pub counted_by: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiscrepancyLine {
    pub product_id: Uuid,
    pub expected_quantity: i32,
    pub actual_quantity: i32,
    pub discrepancy: i32,
}

/// Stock audit campaigns: draft, then in progress, then completed or
/// cancelled. Each state change stamps its timestamp exactly once.
#[derive(Clone)]
pub struct AuditService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl AuditService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(warehouse_id = %request.warehouse_id, audit_number = %request.audit_number))]
    pub async fn create_audit(&self, request: CreateAuditRequest) -> Result<AuditModel, ServiceError> {
        request.validate()?;

        WarehouseEntity::find_by_id(request.warehouse_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("warehouse {} not found", request.warehouse_id))
            })?;

        let model = AuditActiveModel {
            id: Set(Uuid::new_v4()),
            warehouse_id: Set(request.warehouse_id),
            audit_number: Set(request.audit_number),
            status: Set(AuditStatus::Draft.as_str().to_string()),
            started_at: Set(None),
            finished_at: Set(None),
            notes: Set(request.notes),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(audit_id = %model.id, "stock audit created");
        Ok(model)
    }

    #[instrument(skip(self), fields(audit_id = %audit_id))]
    pub async fn get_audit(&self, audit_id: Uuid) -> Result<AuditModel, ServiceError> {
        AuditEntity::find_by_id(audit_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("stock audit {} not found", audit_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_audits(
        &self,
        warehouse_id: Option<Uuid>,
        status: Option<String>,
    ) -> Result<Vec<AuditModel>, ServiceError> {
        let mut query = AuditEntity::find().order_by_desc(stock_audit::Column::CreatedAt);
        if let Some(warehouse_id) = warehouse_id {
            query = query.filter(stock_audit::Column::WarehouseId.eq(warehouse_id));
        }
        if let Some(status) = status {
            let status = AuditStatus::from_str(&status).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown audit status: {}", status))
            })?;
            query = query.filter(stock_audit::Column::Status.eq(status.as_str()));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    /// Moves a draft audit into progress and stamps `started_at` once.
    #[instrument(skip(self), fields(audit_id = %audit_id))]
    pub async fn start(&self, audit_id: Uuid) -> Result<AuditModel, ServiceError> {
        self.transition(audit_id, AuditStatus::InProgress).await
    }

    /// Finishes an in-progress audit and stamps `finished_at` once.
    #[instrument(skip(self), fields(audit_id = %audit_id))]
    pub async fn complete(&self, audit_id: Uuid) -> Result<AuditModel, ServiceError> {
        self.transition(audit_id, AuditStatus::Completed).await
    }

    /// Cancels an audit that has not completed.
    #[instrument(skip(self), fields(audit_id = %audit_id))]
    pub async fn cancel(&self, audit_id: Uuid) -> Result<AuditModel, ServiceError> {
        self.transition(audit_id, AuditStatus::Cancelled).await
    }

    /// Records (or overwrites) the counted quantity for one product. The
    /// expected quantity is captured from the stock record at count time.
    #[instrument(skip(self, request), fields(audit_id = %audit_id, product_id = %request.product_id))]
    pub async fn record_count(
        &self,
        audit_id: Uuid,
        request: RecordCountRequest,
    ) -> Result<CountModel, ServiceError> {
        if request.actual_quantity < 0 {
            return Err(ServiceError::InvalidInput(
                "counted quantity must not be negative".into(),
            ));
        }

        let txn = self.db_pool.begin().await?;

        let audit = AuditEntity::find_by_id(audit_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("stock audit {} not found", audit_id)))?;
        if AuditStatus::from_str(&audit.status) != Some(AuditStatus::InProgress) {
            return Err(ServiceError::InvalidOperation(format!(
                "counts can only be recorded while the audit is in progress, not {}",
                audit.status
            )));
        }

        ProductEntity::find_by_id(request.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("product {} not found", request.product_id))
            })?;

        let expected = ItemEntity::find()
            .filter(inventory_item::Column::ProductId.eq(request.product_id))
            .filter(inventory_item::Column::WarehouseId.eq(audit.warehouse_id))
            .one(&txn)
            .await?
            .map(|item| item.quantity)
            .unwrap_or(0);

        let existing = CountEntity::find()
            .filter(stock_count::Column::AuditId.eq(audit_id))
            .filter(stock_count::Column::ProductId.eq(request.product_id))
            .one(&txn)
            .await?;

        let model = match existing {
            Some(count) => {
                let mut active: CountActiveModel = count.into();
                active.actual_quantity = Set(request.actual_quantity);
                active.counted_by = Set(request.counted_by);
                active.counted_at = Set(Utc::now());
                active.notes = Set(request.notes);
                active.update(&txn).await?
            }
            None => {
                CountActiveModel {
                    id: Set(Uuid::new_v4()),
                    audit_id: Set(audit_id),
                    product_id: Set(request.product_id),
                    expected_quantity: Set(expected),
                    actual_quantity: Set(request.actual_quantity),
                    counted_by: Set(request.counted_by),
                    notes: Set(request.notes),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        Ok(model)
    }

    #[instrument(skip(self), fields(audit_id = %audit_id))]
    pub async fn list_counts(&self, audit_id: Uuid) -> Result<Vec<CountModel>, ServiceError> {
        self.get_audit(audit_id).await?;
        Ok(CountEntity::find()
            .filter(stock_count::Column::AuditId.eq(audit_id))
            .order_by_asc(stock_count::Column::CountedAt)
            .all(&*self.db_pool)
            .await?)
    }

    /// Lines where the counted quantity differs from the expected one.
    #[instrument(skip(self), fields(audit_id = %audit_id))]
    pub async fn discrepancies(&self, audit_id: Uuid) -> Result<Vec<DiscrepancyLine>, ServiceError> {
        let counts = self.list_counts(audit_id).await?;
        Ok(counts
            .into_iter()
            .filter(|c| c.has_discrepancy())
            .map(|c| DiscrepancyLine {
                product_id: c.product_id,
                expected_quantity: c.expected_quantity,
                actual_quantity: c.actual_quantity,
                discrepancy: c.discrepancy(),
            })
            .collect())
    }

    async fn transition(&self, audit_id: Uuid, next: AuditStatus) -> Result<AuditModel, ServiceError> {
        let audit = self.get_audit(audit_id).await?;
        let current = AuditStatus::from_str(&audit.status).ok_or_else(|| {
            ServiceError::InternalError(format!(
                "audit {} has unknown status {}",
                audit_id, audit.status
            ))
        })?;

        let allowed = matches!(
            (current, next),
            (AuditStatus::Draft, AuditStatus::InProgress)
                | (AuditStatus::InProgress, AuditStatus::Completed)
                | (AuditStatus::Draft, AuditStatus::Cancelled)
                | (AuditStatus::InProgress, AuditStatus::Cancelled)
        );
        if !allowed {
            return Err(ServiceError::InvalidTransition(format!(
                "cannot move audit from {} to {}",
                current.as_str(),
                next.as_str()
            )));
        }

        let old_status = audit.status.clone();
        let started_at = audit.started_at;
        let mut active: AuditActiveModel = audit.into();
        active.status = Set(next.as_str().to_string());
        match next {
            AuditStatus::InProgress => {
                if started_at.is_none() {
                    active.started_at = Set(Some(Utc::now()));
                }
            }
            AuditStatus::Completed | AuditStatus::Cancelled => {
                active.finished_at = Set(Some(Utc::now()));
            }
            AuditStatus::Draft => {}
        }

        let updated = active.update(&*self.db_pool).await?;
        info!(audit_id = %audit_id, old_status = %old_status, new_status = %updated.status, "audit status changed");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::AuditStatusChanged {
                    audit_id,
                    old_status,
                    new_status: updated.status.clone(),
                })
                .await
            {
                warn!(error = %e, "failed to send audit status event");
            }
        }

        Ok(updated)
    }
}
