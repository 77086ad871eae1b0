use crate::{
    db::DbPool,
    entities::order::{
        ActiveModel as OrderActiveModel, Entity as OrderEntity, OrderStatus,
    },
    entities::order_history::ActiveModel as HistoryActiveModel,
    entities::payment::{
        self, ActiveModel as PaymentActiveModel, Entity as PaymentEntity, Model as PaymentModel,
        PaymentMethod, PaymentStatus,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub order_id: Uuid,
    pub amount: Decimal,
    pub method: String,
    pub transaction_id: Option<Uuid>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
}

/// Payments against orders. Completing a payment may cascade into the
/// order: a pending order whose completed payments cover its total
/// becomes paid, in the same database transaction.
#[derive(Clone)]
pub struct PaymentService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl PaymentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(order_id = %request.order_id, amount = %request.amount))]
    pub async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentModel, ServiceError> {
        request.validate()?;

        let method = PaymentMethod::from_str(&request.method).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown payment method: {}", request.method))
        })?;
        if request.amount <= Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "payment amount must be positive".into(),
            ));
        }

        OrderEntity::find_by_id(request.order_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("order {} not found", request.order_id))
            })?;

        let model = PaymentActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(request.order_id),
            amount: Set(request.amount),
            method: Set(method.as_str().to_string()),
            status: Set(PaymentStatus::Pending.as_str().to_string()),
            transaction_id: Set(request.transaction_id),
            reference: Set(request.reference),
            notes: Set(request.notes),
            completed_at: Set(None),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(payment_id = %model.id, "payment created");
        Ok(model)
    }

    #[instrument(skip(self), fields(payment_id = %payment_id))]
    pub async fn get_payment(&self, payment_id: Uuid) -> Result<PaymentModel, ServiceError> {
        PaymentEntity::find_by_id(payment_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("payment {} not found", payment_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_payments(
        &self,
        order_id: Option<Uuid>,
        status: Option<String>,
    ) -> Result<Vec<PaymentModel>, ServiceError> {
        let mut query = PaymentEntity::find().order_by_desc(payment::Column::CreatedAt);
        if let Some(order_id) = order_id {
            query = query.filter(payment::Column::OrderId.eq(order_id));
        }
        if let Some(status) = status {
            let status = PaymentStatus::from_str(&status).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown payment status: {}", status))
            })?;
            query = query.filter(payment::Column::Status.eq(status.as_str()));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    /// Marks a pending payment as completed. Re-running the action on an
    /// already completed payment is a conflict, not a second completion.
    #[instrument(skip(self), fields(payment_id = %payment_id))]
    pub async fn complete_payment(&self, payment_id: Uuid) -> Result<PaymentModel, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let payment = PaymentEntity::find_by_id(payment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("payment {} not found", payment_id)))?;

        match PaymentStatus::from_str(&payment.status) {
            Some(PaymentStatus::Pending) => {}
            Some(PaymentStatus::Completed) => {
                return Err(ServiceError::Conflict("payment is already completed".into()));
            }
            Some(other) => {
                return Err(ServiceError::InvalidOperation(format!(
                    "a {} payment cannot be completed",
                    other.as_str()
                )));
            }
            None => {
                return Err(ServiceError::InternalError(format!(
                    "payment {} has unknown status {}",
                    payment_id, payment.status
                )));
            }
        }

        let order_id = payment.order_id;
        let amount = payment.amount;

        let mut active: PaymentActiveModel = payment.into();
        active.status = Set(PaymentStatus::Completed.as_str().to_string());
        active.completed_at = Set(Some(Utc::now()));
        let updated = active.update(&txn).await?;

        // Cascade: a pending order fully covered by completed payments
        // becomes paid, with its own history row.
        let order = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {} not found", order_id)))?;
        if OrderStatus::from_str(&order.status) == Some(OrderStatus::Pending) {
            let completed: Decimal = PaymentEntity::find()
                .filter(payment::Column::OrderId.eq(order_id))
                .filter(payment::Column::Status.eq(PaymentStatus::Completed.as_str()))
                .all(&txn)
                .await?
                .iter()
                .map(|p| p.amount)
                .sum();

            if completed >= order.total_amount {
                let old_status = order.status.clone();
                let paid_at = order.paid_at;
                let mut active: OrderActiveModel = order.into();
                active.status = Set(OrderStatus::Paid.as_str().to_string());
                if paid_at.is_none() {
                    active.paid_at = Set(Some(Utc::now()));
                }
                active.update(&txn).await?;

                HistoryActiveModel {
                    id: Set(Uuid::new_v4()),
                    order_id: Set(order_id),
                    old_status: Set(Some(old_status)),
                    new_status: Set(OrderStatus::Paid.as_str().to_string()),
                    comment: Set(Some(format!("covered by payment {}", payment_id))),
                    changed_by: Set(None),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        info!(payment_id = %payment_id, order_id = %order_id, "payment completed");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::PaymentCompleted {
                    payment_id,
                    order_id,
                    amount,
                })
                .await
            {
                warn!(error = %e, "failed to send payment completed event");
            }
        }

        Ok(updated)
    }

    /// Refunds a completed payment. The order keeps its status; order
    /// level refunds go through the order lifecycle instead.
    #[instrument(skip(self), fields(payment_id = %payment_id))]
    pub async fn refund_payment(&self, payment_id: Uuid) -> Result<PaymentModel, ServiceError> {
        let payment = self.get_payment(payment_id).await?;

        match PaymentStatus::from_str(&payment.status) {
            Some(PaymentStatus::Completed) => {}
            Some(PaymentStatus::Refunded) => {
                return Err(ServiceError::Conflict("payment is already refunded".into()));
            }
            Some(other) => {
                return Err(ServiceError::InvalidOperation(format!(
                    "only completed payments can be refunded, not {}",
                    other.as_str()
                )));
            }
            None => {
                return Err(ServiceError::InternalError(format!(
                    "payment {} has unknown status {}",
                    payment_id, payment.status
                )));
            }
        }

        let order_id = payment.order_id;
        let amount = payment.amount;
        let mut active: PaymentActiveModel = payment.into();
        active.status = Set(PaymentStatus::Refunded.as_str().to_string());
        let updated = active.update(&*self.db_pool).await?;

        info!(payment_id = %payment_id, order_id = %order_id, "payment refunded");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::PaymentRefunded {
                    payment_id,
                    order_id,
                    amount,
                })
                .await
            {
                warn!(error = %e, "failed to send payment refunded event");
            }
        }

        Ok(updated)
    }

    /// Marks a pending payment as failed.
    #[instrument(skip(self), fields(payment_id = %payment_id))]
    pub async fn fail_payment(&self, payment_id: Uuid) -> Result<PaymentModel, ServiceError> {
        let payment = self.get_payment(payment_id).await?;

        if PaymentStatus::from_str(&payment.status) != Some(PaymentStatus::Pending) {
            return Err(ServiceError::InvalidOperation(format!(
                "only pending payments can fail, not {}",
                payment.status
            )));
        }

        let mut active: PaymentActiveModel = payment.into();
        active.status = Set(PaymentStatus::Failed.as_str().to_string());
        Ok(active.update(&*self.db_pool).await?)
    }
}
