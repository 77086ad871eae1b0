use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed stock movements. Each movement mutates the matching inventory item
/// per its kind's rule when recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    Receipt,
    Issue,
    Transfer,
    Adjustment,
    Return,
    Reservation,
    Release,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Receipt => "receipt",
            MovementKind::Issue => "issue",
            MovementKind::Transfer => "transfer",
            MovementKind::Adjustment => "adjustment",
            MovementKind::Return => "return",
            MovementKind::Reservation => "reservation",
            MovementKind::Release => "release",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "receipt" => Some(MovementKind::Receipt),
            "issue" => Some(MovementKind::Issue),
            "transfer" => Some(MovementKind::Transfer),
            "adjustment" => Some(MovementKind::Adjustment),
            "return" => Some(MovementKind::Return),
            "reservation" => Some(MovementKind::Reservation),
            "release" => Some(MovementKind::Release),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub movement_type: String,
    pub product_id: Uuid,
    pub source_warehouse_id: Uuid,
    pub destination_warehouse_id: Option<Uuid>,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub order_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::SourceWarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    SourceWarehouse,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::DestinationWarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    DestinationWarehouse,
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, _insert: bool) -> Result<Self, DbErr> {
        let mut model = self;
        if let ActiveValue::NotSet = model.created_at {
            model.created_at = Set(Utc::now());
        }
        Ok(model)
    }
}
