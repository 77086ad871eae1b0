use crate::{
    db::DbPool,
    entities::account::{
        self, AccountType, ActiveModel as AccountActiveModel, Entity as AccountEntity,
        Model as AccountModel,
    },
    entities::category::{
        self, ActiveModel as CategoryActiveModel, CategoryType, Entity as CategoryEntity,
        Model as CategoryModel,
    },
    entities::transaction::{
        self, ActiveModel as TransactionActiveModel, Entity as TransactionEntity,
        Model as TransactionModel, TransactionType,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, message = "Account name is required"))]
    pub name: String,
    pub account_type: String,
    #[validate(length(min = 3, max = 3, message = "Currency must be 3 characters"))]
    pub currency: String,
    pub description: Option<String>,
    pub account_number: Option<String>,
    pub opening_balance: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub account_number: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    pub category_type: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordTransactionRequest {
    pub transaction_type: String,
    pub amount: Decimal,
    pub date: Option<DateTime<Utc>>,
    pub source_account_id: Uuid,
    pub destination_account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub order_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionModel>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Per-account balance contribution of one ledger row: the account gains
/// what arrives at it and loses what leaves it.
///
/// Income rows are stored with destination == source, so they sit on both
/// sides of the same account and net to zero; only the sides that differ
/// move a balance.
pub(crate) fn account_delta(amount: Decimal, is_source: bool, is_destination: bool) -> Decimal {
    let mut delta = Decimal::ZERO;
    if is_destination {
        delta += amount;
    }
    if is_source {
        delta -= amount;
    }
    delta
}

/// Accounts, categories and the double-sided transaction ledger.
#[derive(Clone)]
pub struct LedgerService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl LedgerService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<AccountModel, ServiceError> {
        request.validate()?;

        let account_type = AccountType::from_str(&request.account_type).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown account type: {}", request.account_type))
        })?;

        let account = AccountActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            account_type: Set(account_type.as_str().to_string()),
            currency: Set(request.currency),
            balance: Set(request.opening_balance.unwrap_or(Decimal::ZERO)),
            description: Set(request.description),
            account_number: Set(request.account_number),
            is_active: Set(true),
            ..Default::default()
        };

        let model = account.insert(&*self.db_pool).await?;
        info!(account_id = %model.id, "account created");
        Ok(model)
    }

    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn get_account(&self, account_id: Uuid) -> Result<AccountModel, ServiceError> {
        AccountEntity::find_by_id(account_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("account {} not found", account_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_accounts(&self, include_inactive: bool) -> Result<Vec<AccountModel>, ServiceError> {
        let mut query = AccountEntity::find().order_by_asc(account::Column::Name);
        if !include_inactive {
            query = query.filter(account::Column::IsActive.eq(true));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    #[instrument(skip(self, request), fields(account_id = %account_id))]
    pub async fn update_account(
        &self,
        account_id: Uuid,
        request: UpdateAccountRequest,
    ) -> Result<AccountModel, ServiceError> {
        let account = self.get_account(account_id).await?;
        let mut active: AccountActiveModel = account.into();

        if let Some(name) = request.name {
            if name.is_empty() {
                return Err(ServiceError::ValidationError("account name is required".into()));
            }
            active.name = Set(name);
        }
        if let Some(description) = request.description {
            active.description = Set(Some(description));
        }
        if let Some(account_number) = request.account_number {
            active.account_number = Set(Some(account_number));
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }

        Ok(active.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryModel, ServiceError> {
        request.validate()?;

        let category_type = CategoryType::from_str(&request.category_type).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown category type: {}", request.category_type))
        })?;

        if let Some(parent_id) = request.parent_id {
            let parent = CategoryEntity::find_by_id(parent_id)
                .one(&*self.db_pool)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("parent category {} not found", parent_id))
                })?;
            if parent.category_type != category_type.as_str() {
                return Err(ServiceError::InvalidInput(
                    "parent category must have the same type".into(),
                ));
            }
        }

        let category = CategoryActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            category_type: Set(category_type.as_str().to_string()),
            description: Set(request.description),
            parent_id: Set(request.parent_id),
            is_active: Set(true),
            ..Default::default()
        };

        Ok(category.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        category_type: Option<String>,
    ) -> Result<Vec<CategoryModel>, ServiceError> {
        let mut query = CategoryEntity::find()
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::Name);
        if let Some(kind) = category_type {
            let kind = CategoryType::from_str(&kind).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown category type: {}", kind))
            })?;
            query = query.filter(category::Column::CategoryType.eq(kind.as_str()));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    /// Records a ledger transaction and recomputes the balance of every
    /// touched account inside the same database transaction.
    ///
    /// Destination is normalised by type before insert: income rows get
    /// destination = source, expense rows get no destination, transfer
    /// rows must name a distinct destination, adjustment rows keep the
    /// destination they were given.
    #[instrument(skip(self, request), fields(transaction_type = %request.transaction_type, amount = %request.amount))]
    pub async fn record_transaction(
        &self,
        request: RecordTransactionRequest,
    ) -> Result<TransactionModel, ServiceError> {
        let tx_type = TransactionType::from_str(&request.transaction_type).ok_or_else(|| {
            ServiceError::InvalidStatus(format!(
                "unknown transaction type: {}",
                request.transaction_type
            ))
        })?;

        if request.amount == Decimal::ZERO {
            return Err(ServiceError::InvalidInput("amount must be non-zero".into()));
        }
        if request.amount < Decimal::ZERO && tx_type != TransactionType::Adjustment {
            return Err(ServiceError::InvalidInput(
                "amount must be positive for non-adjustment transactions".into(),
            ));
        }

        let destination = match tx_type {
            TransactionType::Income => Some(request.source_account_id),
            TransactionType::Expense => None,
            TransactionType::Adjustment => request.destination_account_id,
            TransactionType::Transfer => {
                let dest = request.destination_account_id.ok_or_else(|| {
                    ServiceError::InvalidInput("transfer requires a destination account".into())
                })?;
                if dest == request.source_account_id {
                    return Err(ServiceError::InvalidInput(
                        "transfer destination must differ from source".into(),
                    ));
                }
                Some(dest)
            }
        };

        let txn = self.db_pool.begin().await?;

        let source = AccountEntity::find_by_id(request.source_account_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("account {} not found", request.source_account_id))
            })?;
        if let Some(dest_id) = destination {
            if dest_id != source.id {
                AccountEntity::find_by_id(dest_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("account {} not found", dest_id))
                    })?;
            }
        }

        let transaction_id = Uuid::new_v4();
        let row = TransactionActiveModel {
            id: Set(transaction_id),
            transaction_type: Set(tx_type.as_str().to_string()),
            amount: Set(request.amount),
            date: Set(request.date.unwrap_or_else(Utc::now)),
            source_account_id: Set(request.source_account_id),
            destination_account_id: Set(destination),
            category_id: Set(request.category_id),
            description: Set(request.description),
            order_id: Set(request.order_id),
            supplier_id: Set(request.supplier_id),
            created_by: Set(request.created_by),
            ..Default::default()
        };

        let model = row.insert(&txn).await.map_err(|e| {
            error!(error = %e, "failed to insert transaction");
            ServiceError::DatabaseError(e)
        })?;

        self.recompute_balance_in(&txn, request.source_account_id).await?;
        if let Some(dest_id) = destination {
            if dest_id != request.source_account_id {
                self.recompute_balance_in(&txn, dest_id).await?;
            }
        }

        txn.commit().await?;

        info!(transaction_id = %transaction_id, "transaction recorded");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::TransactionRecorded {
                    transaction_id,
                    transaction_type: tx_type.as_str().to_string(),
                    amount: request.amount,
                })
                .await
            {
                warn!(error = %e, "failed to send transaction event");
            }
        }

        Ok(model)
    }

    #[instrument(skip(self), fields(transaction_id = %transaction_id))]
    pub async fn get_transaction(
        &self,
        transaction_id: Uuid,
    ) -> Result<TransactionModel, ServiceError> {
        TransactionEntity::find_by_id(transaction_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("transaction {} not found", transaction_id))
            })
    }

    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        account_id: Option<Uuid>,
        category_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> Result<TransactionListResponse, ServiceError> {
        let mut query = TransactionEntity::find().order_by_desc(transaction::Column::Date);
        if let Some(account_id) = account_id {
            query = query.filter(
                Condition::any()
                    .add(transaction::Column::SourceAccountId.eq(account_id))
                    .add(transaction::Column::DestinationAccountId.eq(account_id)),
            );
        }
        if let Some(category_id) = category_id {
            query = query.filter(transaction::Column::CategoryId.eq(category_id));
        }

        let paginator = query.paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let transactions = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(TransactionListResponse {
            transactions,
            total,
            page,
            per_page,
        })
    }

    /// Removes a transaction and recomputes the balances it touched.
    #[instrument(skip(self), fields(transaction_id = %transaction_id))]
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db_pool.begin().await?;

        let row = TransactionEntity::find_by_id(transaction_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("transaction {} not found", transaction_id))
            })?;

        let source_id = row.source_account_id;
        let dest_id = row.destination_account_id;

        row.delete(&txn).await?;

        self.recompute_balance_in(&txn, source_id).await?;
        if let Some(dest_id) = dest_id {
            if dest_id != source_id {
                self.recompute_balance_in(&txn, dest_id).await?;
            }
        }

        txn.commit().await?;
        info!(transaction_id = %transaction_id, "transaction deleted");
        Ok(())
    }

    /// Recomputes and stores one account's balance from its full ledger
    /// history. Exposed as a bulk repair action.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn recalculate_balance(&self, account_id: Uuid) -> Result<AccountModel, ServiceError> {
        let txn = self.db_pool.begin().await?;
        let balance = self.recompute_balance_in(&txn, account_id).await?;
        txn.commit().await?;

        info!(account_id = %account_id, balance = %balance, "account balance recalculated");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::AccountBalanceRecalculated {
                    account_id,
                    balance,
                })
                .await
            {
                warn!(error = %e, "failed to send balance event");
            }
        }

        self.get_account(account_id).await
    }

    async fn recompute_balance_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: Uuid,
    ) -> Result<Decimal, ServiceError> {
        let account = AccountEntity::find_by_id(account_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("account {} not found", account_id)))?;

        let rows = TransactionEntity::find()
            .filter(
                Condition::any()
                    .add(transaction::Column::SourceAccountId.eq(account_id))
                    .add(transaction::Column::DestinationAccountId.eq(account_id)),
            )
            .all(conn)
            .await?;

        let mut balance = Decimal::ZERO;
        for row in &rows {
            balance += account_delta(
                row.amount,
                row.source_account_id == account_id,
                row.destination_account_id == Some(account_id),
            );
        }

        let mut active: AccountActiveModel = account.into();
        active.balance = Set(balance);
        active.update(conn).await?;

        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sum_for_account(rows: &[(Decimal, bool, bool)]) -> Decimal {
        rows.iter()
            .map(|(a, src, dst)| account_delta(*a, *src, *dst))
            .sum()
    }

    // An income row is stored with destination == source, so it lands on
    // both sides of the same account and nets to zero.
    #[test]
    fn income_row_is_balance_neutral_for_its_account() {
        assert_eq!(account_delta(dec!(100), true, true), Decimal::ZERO);
    }

    #[test]
    fn expense_debits_its_source() {
        assert_eq!(account_delta(dec!(40), true, false), dec!(-40));
    }

    #[test]
    fn transfer_moves_between_accounts() {
        assert_eq!(account_delta(dec!(25), true, false), dec!(-25));
        assert_eq!(account_delta(dec!(25), false, true), dec!(25));
    }

    #[test]
    fn adjustment_into_an_account_credits_it() {
        assert_eq!(account_delta(dec!(15), false, true), dec!(15));
        assert_eq!(account_delta(dec!(-15), false, true), dec!(-15));
    }

    #[test]
    fn mixed_history_sums_to_incoming_minus_outgoing() {
        // transfer in 100, expense 30, transfer out 20, income 50 (both sides)
        let rows = [
            (dec!(100), false, true),
            (dec!(30), true, false),
            (dec!(20), true, false),
            (dec!(50), true, true),
        ];
        assert_eq!(sum_for_account(&rows), dec!(50));
    }

    #[test]
    fn unrelated_row_contributes_nothing() {
        assert_eq!(account_delta(dec!(99), false, false), Decimal::ZERO);
    }
}
