use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counted quantity for one product within a stock audit; unique per
/// (audit, product).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_counts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub audit_id: Uuid,
    pub product_id: Uuid,
    pub expected_quantity: i32,
    pub actual_quantity: i32,
    pub counted_by: Option<Uuid>,
    pub counted_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Model {
    /// Signed difference between counted and expected quantity.
    pub fn discrepancy(&self) -> i32 {
        self.actual_quantity - self.expected_quantity
    }

    pub fn has_discrepancy(&self) -> bool {
        self.discrepancy() != 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_audit::Entity",
        from = "Column::AuditId",
        to = "super::stock_audit::Column::Id"
    )]
    Audit,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::stock_audit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Audit.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, _insert: bool) -> Result<Self, DbErr> {
        let mut model = self;
        if let ActiveValue::NotSet = model.counted_at {
            model.counted_at = Set(Utc::now());
        }
        Ok(model)
    }
}
