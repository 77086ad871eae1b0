use crate::{
    db::DbPool,
    entities::debt::{
        self, ActiveModel as DebtActiveModel, DebtStatus, DebtType, Entity as DebtEntity,
        Model as DebtModel,
    },
    entities::debt_payment::{
        self, ActiveModel as DebtPaymentActiveModel, Entity as DebtPaymentEntity,
        Model as DebtPaymentModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateDebtRequest {
    pub debt_type: String,
    pub amount: Decimal,
    #[validate(length(min = 3, max = 3, message = "Currency must be 3 characters"))]
    pub currency: String,
    pub date_created: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordDebtPaymentRequest {
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub transaction_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DebtListResponse {
    pub debts: Vec<DebtModel>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Receivables and payables, with payments folding into a derived status.
#[derive(Clone)]
pub struct DebtService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl DebtService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(debt_type = %request.debt_type, amount = %request.amount))]
    pub async fn create_debt(&self, request: CreateDebtRequest) -> Result<DebtModel, ServiceError> {
        request.validate()?;

        let debt_type = DebtType::from_str(&request.debt_type).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown debt type: {}", request.debt_type))
        })?;
        if request.amount <= Decimal::ZERO {
            return Err(ServiceError::InvalidInput("debt amount must be positive".into()));
        }

        let debt = DebtActiveModel {
            id: Set(Uuid::new_v4()),
            debt_type: Set(debt_type.as_str().to_string()),
            amount: Set(request.amount),
            paid_amount: Set(Decimal::ZERO),
            currency: Set(request.currency),
            date_created: Set(request
                .date_created
                .unwrap_or_else(|| Utc::now().date_naive())),
            due_date: Set(request.due_date),
            status: Set(DebtStatus::Active.as_str().to_string()),
            user_id: Set(request.user_id),
            supplier_id: Set(request.supplier_id),
            order_id: Set(request.order_id),
            description: Set(request.description),
            notes: Set(request.notes),
            created_by: Set(request.created_by),
            ..Default::default()
        };

        let model = debt.insert(&*self.db_pool).await?;
        info!(debt_id = %model.id, "debt created");
        Ok(model)
    }

    #[instrument(skip(self), fields(debt_id = %debt_id))]
    pub async fn get_debt(&self, debt_id: Uuid) -> Result<DebtModel, ServiceError> {
        DebtEntity::find_by_id(debt_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("debt {} not found", debt_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_debts(
        &self,
        status: Option<String>,
        debt_type: Option<String>,
        page: u64,
        per_page: u64,
    ) -> Result<DebtListResponse, ServiceError> {
        let mut query = DebtEntity::find().order_by_desc(debt::Column::DateCreated);
        if let Some(status) = status {
            let status = DebtStatus::from_str(&status).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown debt status: {}", status))
            })?;
            query = query.filter(debt::Column::Status.eq(status.as_str()));
        }
        if let Some(debt_type) = debt_type {
            let debt_type = DebtType::from_str(&debt_type).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown debt type: {}", debt_type))
            })?;
            query = query.filter(debt::Column::DebtType.eq(debt_type.as_str()));
        }

        let paginator = query.paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let debts = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(DebtListResponse {
            debts,
            total,
            page,
            per_page,
        })
    }

    #[instrument(skip(self), fields(debt_id = %debt_id))]
    pub async fn list_payments(&self, debt_id: Uuid) -> Result<Vec<DebtPaymentModel>, ServiceError> {
        self.get_debt(debt_id).await?;
        Ok(DebtPaymentEntity::find()
            .filter(debt_payment::Column::DebtId.eq(debt_id))
            .order_by_asc(debt_payment::Column::Date)
            .all(&*self.db_pool)
            .await?)
    }

    /// Records a payment against a debt, then recomputes `paid_amount`
    /// from the payment rows and re-derives the status, all in one
    /// database transaction.
    #[instrument(skip(self, request), fields(debt_id = %debt_id, amount = %request.amount))]
    pub async fn record_payment(
        &self,
        debt_id: Uuid,
        request: RecordDebtPaymentRequest,
    ) -> Result<DebtModel, ServiceError> {
        request.validate()?;

        if request.amount <= Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "payment amount must be positive".into(),
            ));
        }

        let txn = self.db_pool.begin().await?;

        let debt = DebtEntity::find_by_id(debt_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("debt {} not found", debt_id)))?;

        match DebtStatus::from_str(&debt.status) {
            Some(DebtStatus::Cancelled) => {
                return Err(ServiceError::InvalidOperation(
                    "cannot record a payment against a cancelled debt".into(),
                ));
            }
            Some(DebtStatus::Paid) => {
                return Err(ServiceError::Conflict("debt is already fully paid".into()));
            }
            Some(_) => {}
            None => {
                return Err(ServiceError::InternalError(format!(
                    "debt {} has unknown status {}",
                    debt_id, debt.status
                )));
            }
        }

        let payment_id = Uuid::new_v4();
        let payment = DebtPaymentActiveModel {
            id: Set(payment_id),
            debt_id: Set(debt_id),
            amount: Set(request.amount),
            date: Set(request.date.unwrap_or_else(|| Utc::now().date_naive())),
            transaction_id: Set(request.transaction_id),
            notes: Set(request.notes),
            created_by: Set(request.created_by),
            ..Default::default()
        };
        payment.insert(&txn).await?;

        let updated = self.refresh_debt_in(&txn, debt).await?;

        txn.commit().await?;

        info!(debt_id = %debt_id, payment_id = %payment_id, status = %updated.status, "debt payment recorded");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::DebtPaymentRecorded {
                    debt_id,
                    payment_id,
                    amount: request.amount,
                })
                .await
            {
                warn!(error = %e, "failed to send debt payment event");
            }
        }

        Ok(updated)
    }

    /// Bulk action: settle the debt in full regardless of recorded
    /// payments.
    #[instrument(skip(self), fields(debt_id = %debt_id))]
    pub async fn mark_paid(&self, debt_id: Uuid) -> Result<DebtModel, ServiceError> {
        let debt = self.get_debt(debt_id).await?;

        if DebtStatus::from_str(&debt.status) == Some(DebtStatus::Cancelled) {
            return Err(ServiceError::InvalidOperation(
                "cannot mark a cancelled debt as paid".into(),
            ));
        }

        let old_status = debt.status.clone();
        let amount = debt.amount;
        let mut active: DebtActiveModel = debt.into();
        active.paid_amount = Set(amount);
        active.status = Set(DebtStatus::Paid.as_str().to_string());
        let updated = active.update(&*self.db_pool).await?;

        self.emit_status_change(debt_id, old_status, updated.status.clone())
            .await;
        Ok(updated)
    }

    #[instrument(skip(self), fields(debt_id = %debt_id))]
    pub async fn cancel(&self, debt_id: Uuid) -> Result<DebtModel, ServiceError> {
        let debt = self.get_debt(debt_id).await?;

        if DebtStatus::from_str(&debt.status) == Some(DebtStatus::Paid) {
            return Err(ServiceError::InvalidOperation(
                "cannot cancel a fully paid debt".into(),
            ));
        }

        let old_status = debt.status.clone();
        let mut active: DebtActiveModel = debt.into();
        active.status = Set(DebtStatus::Cancelled.as_str().to_string());
        let updated = active.update(&*self.db_pool).await?;

        self.emit_status_change(debt_id, old_status, updated.status.clone())
            .await;
        Ok(updated)
    }

    async fn refresh_debt_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        debt: DebtModel,
    ) -> Result<DebtModel, ServiceError> {
        let payments = DebtPaymentEntity::find()
            .filter(debt_payment::Column::DebtId.eq(debt.id))
            .all(conn)
            .await?;
        let paid_amount: Decimal = payments.iter().map(|p| p.amount).sum();

        let status = DebtStatus::derive(debt.amount, paid_amount);
        let mut active: DebtActiveModel = debt.into();
        active.paid_amount = Set(paid_amount);
        active.status = Set(status.as_str().to_string());
        Ok(active.update(conn).await?)
    }

    async fn emit_status_change(&self, debt_id: Uuid, old_status: String, new_status: String) {
        if old_status == new_status {
            return;
        }
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::DebtStatusChanged {
                    debt_id,
                    old_status,
                    new_status,
                })
                .await
            {
                warn!(error = %e, debt_id = %debt_id, "failed to send debt status event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::debt::DebtStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn status_thresholds() {
        assert_eq!(DebtStatus::derive(dec!(100), dec!(0)), DebtStatus::Active);
        assert_eq!(
            DebtStatus::derive(dec!(100), dec!(40)),
            DebtStatus::PartiallyPaid
        );
        assert_eq!(DebtStatus::derive(dec!(100), dec!(100)), DebtStatus::Paid);
        assert_eq!(DebtStatus::derive(dec!(100), dec!(150)), DebtStatus::Paid);
    }
}
