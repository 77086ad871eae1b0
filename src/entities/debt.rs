use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtType {
    Receivable,
    Payable,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::Receivable => "receivable",
            DebtType::Payable => "payable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "receivable" => Some(DebtType::Receivable),
            "payable" => Some(DebtType::Payable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtStatus {
    Active,
    PartiallyPaid,
    Paid,
    Cancelled,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtStatus::Active => "active",
            DebtStatus::PartiallyPaid => "partially_paid",
            DebtStatus::Paid => "paid",
            DebtStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(DebtStatus::Active),
            "partially_paid" => Some(DebtStatus::PartiallyPaid),
            "paid" => Some(DebtStatus::Paid),
            "cancelled" => Some(DebtStatus::Cancelled),
            _ => None,
        }
    }

    /// Threshold rule: paid ≥ amount → paid; 0 < paid < amount →
    /// partially_paid; else active.
    pub fn derive(amount: Decimal, paid_amount: Decimal) -> Self {
        if paid_amount >= amount {
            DebtStatus::Paid
        } else if paid_amount > Decimal::ZERO {
            DebtStatus::PartiallyPaid
        } else {
            DebtStatus::Active
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub debt_type: String,
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub currency: String,
    pub date_created: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn remaining_amount(&self) -> Decimal {
        self.amount - self.paid_amount
    }

    /// A debt is overdue once its due date has passed and it still awaits
    /// payment.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => {
                due < today
                    && matches!(
                        DebtStatus::from_str(&self.status),
                        Some(DebtStatus::Active) | Some(DebtStatus::PartiallyPaid)
                    )
            }
            None => false,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::debt_payment::Entity")]
    Payments,
}

impl Related<super::debt_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr> {
        let mut model = self;
        if insert {
            if let ActiveValue::NotSet = model.created_at {
                model.created_at = Set(Utc::now());
            }
        } else {
            model.updated_at = Set(Some(Utc::now()));
        }
        Ok(model)
    }
}
