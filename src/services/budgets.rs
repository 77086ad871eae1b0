use crate::{
    db::DbPool,
    entities::budget::{
        self, ActiveModel as BudgetActiveModel, BudgetPeriod, Entity as BudgetEntity,
        Model as BudgetModel,
    },
    entities::budget_category::{
        self, ActiveModel as BudgetCategoryActiveModel, Entity as BudgetCategoryEntity,
    },
    entities::category::{CategoryType, Entity as CategoryEntity},
    entities::transaction::{self, Entity as TransactionEntity, TransactionType},
    errors::ServiceError,
};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBudgetRequest {
    #[validate(length(min = 1, message = "Budget name is required"))]
    pub name: String,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub income_budget: Decimal,
    pub expense_budget: Decimal,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SetBudgetCategoryRequest {
    pub category_id: Uuid,
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub category_id: Uuid,
    pub category_name: String,
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub progress_percent: Decimal,
}

/// Planned vs. actual figures for one budget window, computed at read
/// time from the transaction ledger.
#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetPerformance {
    pub budget: BudgetModel,
    pub income_actual: Decimal,
    pub expense_actual: Decimal,
    pub income_progress_percent: Decimal,
    pub expense_progress_percent: Decimal,
    pub categories: Vec<CategoryPerformance>,
}

/// Progress of actual against budgeted, as a percentage. A zero or
/// negative denominator yields zero rather than an error.
pub(crate) fn progress_percent(actual: Decimal, budgeted: Decimal) -> Decimal {
    if budgeted <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    actual / budgeted * Decimal::from(100)
}

#[derive(Clone)]
pub struct BudgetService {
    db_pool: Arc<DbPool>,
}

impl BudgetService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_budget(
        &self,
        request: CreateBudgetRequest,
    ) -> Result<BudgetModel, ServiceError> {
        request.validate()?;

        let period = BudgetPeriod::from_str(&request.period).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown budget period: {}", request.period))
        })?;
        if request.end_date < request.start_date {
            return Err(ServiceError::InvalidInput(
                "budget end date must not precede its start date".into(),
            ));
        }

        let budget = BudgetActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            period: Set(period.as_str().to_string()),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            income_budget: Set(request.income_budget),
            expense_budget: Set(request.expense_budget),
            description: Set(request.description),
            is_active: Set(true),
            created_by: Set(request.created_by),
            ..Default::default()
        };

        let model = budget.insert(&*self.db_pool).await?;
        info!(budget_id = %model.id, "budget created");
        Ok(model)
    }

    #[instrument(skip(self), fields(budget_id = %budget_id))]
    pub async fn get_budget(&self, budget_id: Uuid) -> Result<BudgetModel, ServiceError> {
        BudgetEntity::find_by_id(budget_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("budget {} not found", budget_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_budgets(&self, include_inactive: bool) -> Result<Vec<BudgetModel>, ServiceError> {
        let mut query = BudgetEntity::find().order_by_desc(budget::Column::StartDate);
        if !include_inactive {
            query = query.filter(budget::Column::IsActive.eq(true));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    /// Creates or replaces the per-category budget line.
    #[instrument(skip(self, request), fields(budget_id = %budget_id, category_id = %request.category_id))]
    pub async fn set_category_amount(
        &self,
        budget_id: Uuid,
        request: SetBudgetCategoryRequest,
    ) -> Result<(), ServiceError> {
        self.get_budget(budget_id).await?;
        CategoryEntity::find_by_id(request.category_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("category {} not found", request.category_id))
            })?;
        if request.amount < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "budgeted amount must not be negative".into(),
            ));
        }

        let existing = BudgetCategoryEntity::find()
            .filter(budget_category::Column::BudgetId.eq(budget_id))
            .filter(budget_category::Column::CategoryId.eq(request.category_id))
            .one(&*self.db_pool)
            .await?;

        match existing {
            Some(line) => {
                let mut active: BudgetCategoryActiveModel = line.into();
                active.amount = Set(request.amount);
                active.update(&*self.db_pool).await?;
            }
            None => {
                let line = BudgetCategoryActiveModel {
                    id: Set(Uuid::new_v4()),
                    budget_id: Set(budget_id),
                    category_id: Set(request.category_id),
                    amount: Set(request.amount),
                };
                line.insert(&*self.db_pool).await?;
            }
        }

        Ok(())
    }

    #[instrument(skip(self), fields(budget_id = %budget_id))]
    pub async fn deactivate(&self, budget_id: Uuid) -> Result<BudgetModel, ServiceError> {
        let budget = self.get_budget(budget_id).await?;
        let mut active: BudgetActiveModel = budget.into();
        active.is_active = Set(false);
        Ok(active.update(&*self.db_pool).await?)
    }

    /// Actuals over the budget window, inclusive of both endpoints.
    #[instrument(skip(self), fields(budget_id = %budget_id))]
    pub async fn performance(&self, budget_id: Uuid) -> Result<BudgetPerformance, ServiceError> {
        let budget = self.get_budget(budget_id).await?;

        let window_start = Utc.from_utc_datetime(&budget.start_date.and_time(NaiveTime::MIN));
        let window_end = Utc.from_utc_datetime(
            &budget
                .end_date
                .succ_opt()
                .unwrap_or(budget.end_date)
                .and_time(NaiveTime::MIN),
        );

        let rows = TransactionEntity::find()
            .filter(transaction::Column::Date.gte(window_start))
            .filter(transaction::Column::Date.lt(window_end))
            .all(&*self.db_pool)
            .await?;

        let mut income_actual = Decimal::ZERO;
        let mut expense_actual = Decimal::ZERO;
        for row in &rows {
            match TransactionType::from_str(&row.transaction_type) {
                Some(TransactionType::Income) => income_actual += row.amount,
                Some(TransactionType::Expense) => expense_actual += row.amount,
                _ => {}
            }
        }

        let lines = BudgetCategoryEntity::find()
            .filter(budget_category::Column::BudgetId.eq(budget_id))
            .all(&*self.db_pool)
            .await?;

        let mut categories = Vec::with_capacity(lines.len());
        for line in lines {
            let category = CategoryEntity::find_by_id(line.category_id)
                .one(&*self.db_pool)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("category {} not found", line.category_id))
                })?;

            // Transfers never count against category budgets; only rows of
            // the category's own kind do.
            let expected_type = match CategoryType::from_str(&category.category_type) {
                Some(CategoryType::Income) => TransactionType::Income,
                Some(CategoryType::Expense) => TransactionType::Expense,
                None => {
                    return Err(ServiceError::InternalError(format!(
                        "category {} has unknown type {}",
                        category.id, category.category_type
                    )));
                }
            };

            let actual: Decimal = rows
                .iter()
                .filter(|r| r.category_id == Some(line.category_id))
                .filter(|r| {
                    TransactionType::from_str(&r.transaction_type) == Some(expected_type)
                })
                .map(|r| r.amount)
                .sum();

            categories.push(CategoryPerformance {
                category_id: line.category_id,
                category_name: category.name,
                budgeted: line.amount,
                actual,
                progress_percent: progress_percent(actual, line.amount),
            });
        }

        Ok(BudgetPerformance {
            income_progress_percent: progress_percent(income_actual, budget.income_budget),
            expense_progress_percent: progress_percent(expense_actual, budget.expense_budget),
            budget,
            income_actual,
            expense_actual,
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::progress_percent;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn progress_is_a_plain_percentage() {
        assert_eq!(progress_percent(dec!(50), dec!(200)), dec!(25));
        assert_eq!(progress_percent(dec!(200), dec!(200)), dec!(100));
    }

    #[test]
    fn overspend_exceeds_one_hundred() {
        assert_eq!(progress_percent(dec!(300), dec!(200)), dec!(150));
    }

    #[test]
    fn zero_or_negative_budget_yields_zero() {
        assert_eq!(progress_percent(dec!(50), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(progress_percent(dec!(50), dec!(-10)), Decimal::ZERO);
    }
}
