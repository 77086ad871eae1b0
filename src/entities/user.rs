use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles an operator can hold; consumed by every other component for
/// authorship and audit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Observer,
    User,
    Accountant,
    Warehouse,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Observer => "observer",
            UserRole::User => "user",
            UserRole::Accountant => "accountant",
            UserRole::Warehouse => "warehouse",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "observer" => Some(UserRole::Observer),
            "user" => Some(UserRole::User),
            "accountant" => Some(UserRole::Accountant),
            "warehouse" => Some(UserRole::Warehouse),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub telegram_id: Option<String>,
    pub phone_number: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl Model {
    pub fn role(&self) -> Option<UserRole> {
        UserRole::from_str(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin.as_str()
    }

    pub fn is_accountant(&self) -> bool {
        self.role == UserRole::Accountant.as_str()
    }

    pub fn is_warehouse(&self) -> bool {
        self.role == UserRole::Warehouse.as_str()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_activity::Entity")]
    Activities,
}

impl Related<super::user_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr> {
        let mut model = self;
        if insert {
            if let ActiveValue::NotSet = model.date_joined {
                model.date_joined = Set(Utc::now());
            }
        }
        Ok(model)
    }
}
