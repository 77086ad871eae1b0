use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shipment tracking statuses as carriers report them. Carriers report
/// out of order, so any known status may follow any other; `unknown` is
/// the catch-all a carrier feed may hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingStatus {
    Pending,
    Shipped,
    InTransit,
    Customs,
    Arrived,
    Delivered,
    Returned,
    Lost,
    Unknown,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::Pending => "pending",
            TrackingStatus::Shipped => "shipped",
            TrackingStatus::InTransit => "in_transit",
            TrackingStatus::Customs => "customs",
            TrackingStatus::Arrived => "arrived",
            TrackingStatus::Delivered => "delivered",
            TrackingStatus::Returned => "returned",
            TrackingStatus::Lost => "lost",
            TrackingStatus::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TrackingStatus::Pending),
            "shipped" => Some(TrackingStatus::Shipped),
            "in_transit" => Some(TrackingStatus::InTransit),
            "customs" => Some(TrackingStatus::Customs),
            "arrived" => Some(TrackingStatus::Arrived),
            "delivered" => Some(TrackingStatus::Delivered),
            "returned" => Some(TrackingStatus::Returned),
            "lost" => Some(TrackingStatus::Lost),
            "unknown" => Some(TrackingStatus::Unknown),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracking_numbers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub tracking_number: String,
    pub company_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub status: String,
    pub description: Option<String>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    // Operator flags, orthogonal to the carrier-reported status
    pub is_archived: bool,
    pub is_problematic: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tracking_company::Entity",
        from = "Column::CompanyId",
        to = "super::tracking_company::Column::Id"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    #[sea_orm(has_many = "super::tracking_history::Entity")]
    History,
    #[sea_orm(has_many = "super::tracking_notification::Entity")]
    Notifications,
}

impl Related<super::tracking_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::tracking_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl Related<super::tracking_notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_carrier_status_round_trips_through_its_wire_string() {
        for status in [
            "pending",
            "shipped",
            "in_transit",
            "customs",
            "arrived",
            "delivered",
            "returned",
            "lost",
            "unknown",
        ] {
            let parsed = TrackingStatus::from_str(status).expect(status);
            assert_eq!(parsed.as_str(), status);
        }
    }

    #[test]
    fn unrecognised_status_strings_do_not_parse() {
        assert!(TrackingStatus::from_str("archived").is_none());
        assert!(TrackingStatus::from_str("ready_for_pickup").is_none());
        assert!(TrackingStatus::from_str("").is_none());
    }
}
