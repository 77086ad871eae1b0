use crate::{
    db::DbPool,
    entities::inventory_item::{
        self, ActiveModel as ItemActiveModel, Entity as ItemEntity, Model as ItemModel,
    },
    entities::inventory_movement::{
        self, ActiveModel as MovementActiveModel, Entity as MovementEntity,
        Model as MovementModel, MovementKind,
    },
    entities::product::Entity as ProductEntity,
    entities::warehouse::{
        self, ActiveModel as WarehouseActiveModel, Entity as WarehouseEntity,
        Model as WarehouseModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
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
pub struct CreateWarehouseRequest {
    #[validate(length(min = 1, message = "Warehouse name is required"))]
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordMovementRequest {
    pub movement_type: String,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub destination_warehouse_id: Option<Uuid>,
    pub quantity: i32,
    pub unit_cost: Option<Decimal>,
    pub order_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovementListResponse {
    pub movements: Vec<MovementModel>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Quantities of one stock record, used by the movement arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StockLevel {
    pub quantity: i32,
    pub reserved: i32,
}

impl StockLevel {
    fn available(&self) -> i32 {
        self.quantity - self.reserved
    }
}

/// Applies one movement to the stock record of the source warehouse.
///
/// The invariant 0 <= reserved <= quantity holds before and after: any
/// movement that would break it is rejected instead of clamped.
pub(crate) fn apply_movement(
    kind: MovementKind,
    level: StockLevel,
    quantity: i32,
) -> Result<StockLevel, ServiceError> {
    match kind {
        MovementKind::Receipt | MovementKind::Return => Ok(StockLevel {
            quantity: level.quantity + quantity,
            ..level
        }),
        MovementKind::Issue | MovementKind::Transfer => {
            if level.available() < quantity {
                return Err(ServiceError::InsufficientStock(format!(
                    "need {}, have {} available",
                    quantity,
                    level.available()
                )));
            }
            Ok(StockLevel {
                quantity: level.quantity - quantity,
                ..level
            })
        }
        MovementKind::Adjustment => {
            if quantity < level.reserved {
                return Err(ServiceError::InvalidInput(format!(
                    "cannot adjust below the reserved quantity of {}",
                    level.reserved
                )));
            }
            Ok(StockLevel {
                quantity,
                ..level
            })
        }
        MovementKind::Reservation => {
            if level.available() < quantity {
                return Err(ServiceError::InsufficientStock(format!(
                    "need {}, have {} available",
                    quantity,
                    level.available()
                )));
            }
            Ok(StockLevel {
                reserved: level.reserved + quantity,
                ..level
            })
        }
        MovementKind::Release => {
            if level.reserved < quantity {
                return Err(ServiceError::InsufficientReserved(format!(
                    "need {}, have {} reserved",
                    quantity, level.reserved
                )));
            }
            Ok(StockLevel {
                reserved: level.reserved - quantity,
                ..level
            })
        }
    }
}

/// Warehouses, stock records, and the typed movement journal that is the
/// only way stock quantities change.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_warehouse(
        &self,
        request: CreateWarehouseRequest,
    ) -> Result<WarehouseModel, ServiceError> {
        request.validate()?;

        let model = WarehouseActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            address: Set(request.address),
            description: Set(request.description),
            contact_person: Set(request.contact_person),
            phone: Set(request.phone),
            email: Set(request.email),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(warehouse_id = %model.id, "warehouse created");
        Ok(model)
    }

    #[instrument(skip(self), fields(warehouse_id = %warehouse_id))]
    pub async fn get_warehouse(&self, warehouse_id: Uuid) -> Result<WarehouseModel, ServiceError> {
        WarehouseEntity::find_by_id(warehouse_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("warehouse {} not found", warehouse_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_warehouses(&self) -> Result<Vec<WarehouseModel>, ServiceError> {
        Ok(WarehouseEntity::find()
            .filter(warehouse::Column::IsActive.eq(true))
            .order_by_asc(warehouse::Column::Name)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_stock(
        &self,
        warehouse_id: Option<Uuid>,
        product_id: Option<Uuid>,
    ) -> Result<Vec<ItemModel>, ServiceError> {
        let mut query = ItemEntity::find().order_by_desc(inventory_item::Column::LastUpdated);
        if let Some(warehouse_id) = warehouse_id {
            query = query.filter(inventory_item::Column::WarehouseId.eq(warehouse_id));
        }
        if let Some(product_id) = product_id {
            query = query.filter(inventory_item::Column::ProductId.eq(product_id));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn get_stock_item(&self, item_id: Uuid) -> Result<ItemModel, ServiceError> {
        ItemEntity::find_by_id(item_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("stock record {} not found", item_id)))
    }

    /// Records a typed movement and applies it to the affected stock
    /// records in one database transaction. A movement whose rule fails
    /// leaves no trace: the row and the quantity change roll back
    /// together.
    #[instrument(skip(self, request), fields(movement_type = %request.movement_type, product_id = %request.product_id, quantity = request.quantity))]
    pub async fn record_movement(
        &self,
        request: RecordMovementRequest,
    ) -> Result<MovementModel, ServiceError> {
        let kind = MovementKind::from_str(&request.movement_type).ok_or_else(|| {
            ServiceError::InvalidStatus(format!(
                "unknown movement type: {}",
                request.movement_type
            ))
        })?;

        if kind == MovementKind::Adjustment {
            if request.quantity < 0 {
                return Err(ServiceError::InvalidInput(
                    "adjustment quantity must not be negative".into(),
                ));
            }
        } else if request.quantity <= 0 {
            return Err(ServiceError::InvalidInput(
                "movement quantity must be positive".into(),
            ));
        }

        let destination_id = match kind {
            MovementKind::Transfer => {
                let dest = request.destination_warehouse_id.ok_or_else(|| {
                    ServiceError::InvalidInput("transfer requires a destination warehouse".into())
                })?;
                if dest == request.warehouse_id {
                    return Err(ServiceError::InvalidInput(
                        "transfer destination must differ from source".into(),
                    ));
                }
                Some(dest)
            }
            _ => None,
        };

        let txn = self.db_pool.begin().await?;

        ProductEntity::find_by_id(request.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("product {} not found", request.product_id))
            })?;
        WarehouseEntity::find_by_id(request.warehouse_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("warehouse {} not found", request.warehouse_id))
            })?;
        if let Some(dest) = destination_id {
            WarehouseEntity::find_by_id(dest)
                .one(&txn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("warehouse {} not found", dest)))?;
        }

        // Movements that add stock may create the record; the rest need
        // an existing one to act on.
        let creates_stock = matches!(
            kind,
            MovementKind::Receipt | MovementKind::Return | MovementKind::Adjustment
        );
        let item = self
            .find_item(&txn, request.product_id, request.warehouse_id)
            .await?;
        let item = match (item, creates_stock) {
            (Some(item), _) => item,
            (None, true) => {
                self.create_item(
                    &txn,
                    request.product_id,
                    request.warehouse_id,
                    request.unit_cost.unwrap_or(Decimal::ZERO),
                )
                .await?
            }
            (None, false) => {
                return Err(ServiceError::InsufficientStock(format!(
                    "no stock record for product {} in warehouse {}",
                    request.product_id, request.warehouse_id
                )));
            }
        };

        let level = StockLevel {
            quantity: item.quantity,
            reserved: item.reserved_quantity,
        };
        let next = apply_movement(kind, level, request.quantity)?;

        let unit_cost = item.unit_cost;
        let mut active: ItemActiveModel = item.into();
        active.quantity = Set(next.quantity);
        active.reserved_quantity = Set(next.reserved);
        // A receipt with an explicit cost re-prices the stock record.
        if kind == MovementKind::Receipt {
            if let Some(cost) = request.unit_cost {
                active.unit_cost = Set(cost);
            }
        }
        active.update(&txn).await?;

        if let Some(dest) = destination_id {
            let dest_item = match self.find_item(&txn, request.product_id, dest).await? {
                Some(item) => item,
                None => {
                    self.create_item(&txn, request.product_id, dest, unit_cost)
                        .await?
                }
            };
            let quantity = dest_item.quantity + request.quantity;
            let mut active: ItemActiveModel = dest_item.into();
            active.quantity = Set(quantity);
            active.update(&txn).await?;
        }

        let movement_id = Uuid::new_v4();
        let movement = MovementActiveModel {
            id: Set(movement_id),
            movement_type: Set(kind.as_str().to_string()),
            product_id: Set(request.product_id),
            source_warehouse_id: Set(request.warehouse_id),
            destination_warehouse_id: Set(destination_id),
            quantity: Set(request.quantity),
            unit_cost: Set(request.unit_cost.unwrap_or(unit_cost)),
            order_id: Set(request.order_id),
            notes: Set(request.notes),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(movement_id = %movement_id, "inventory movement recorded");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::MovementRecorded {
                    movement_id,
                    movement_type: kind.as_str().to_string(),
                    product_id: request.product_id,
                    warehouse_id: request.warehouse_id,
                    quantity: request.quantity,
                })
                .await
            {
                warn!(error = %e, "failed to send movement event");
            }
        }

        Ok(movement)
    }

    /// Bulk action: reserve one unit on a stock record.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn reserve_one(&self, item_id: Uuid) -> Result<MovementModel, ServiceError> {
        let item = self.get_stock_item(item_id).await?;
        self.record_movement(RecordMovementRequest {
            movement_type: MovementKind::Reservation.as_str().to_string(),
            product_id: item.product_id,
            warehouse_id: item.warehouse_id,
            destination_warehouse_id: None,
            quantity: 1,
            unit_cost: None,
            order_id: None,
            notes: None,
            created_by: None,
        })
        .await
    }

    /// Bulk action: release one reserved unit on a stock record.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn release_one(&self, item_id: Uuid) -> Result<MovementModel, ServiceError> {
        let item = self.get_stock_item(item_id).await?;
        self.record_movement(RecordMovementRequest {
            movement_type: MovementKind::Release.as_str().to_string(),
            product_id: item.product_id,
            warehouse_id: item.warehouse_id,
            destination_warehouse_id: None,
            quantity: 1,
            unit_cost: None,
            order_id: None,
            notes: None,
            created_by: None,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_movements(
        &self,
        product_id: Option<Uuid>,
        warehouse_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> Result<MovementListResponse, ServiceError> {
        let mut query = MovementEntity::find().order_by_desc(inventory_movement::Column::CreatedAt);
        if let Some(product_id) = product_id {
            query = query.filter(inventory_movement::Column::ProductId.eq(product_id));
        }
        if let Some(warehouse_id) = warehouse_id {
            query = query.filter(inventory_movement::Column::SourceWarehouseId.eq(warehouse_id));
        }

        let paginator = query.paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let movements = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(MovementListResponse {
            movements,
            total,
            page,
            per_page,
        })
    }

    async fn find_item<C: ConnectionTrait>(
        &self,
        conn: &C,
        product_id: Uuid,
        warehouse_id: Uuid,
    ) -> Result<Option<ItemModel>, ServiceError> {
        Ok(ItemEntity::find()
            .filter(inventory_item::Column::ProductId.eq(product_id))
            .filter(inventory_item::Column::WarehouseId.eq(warehouse_id))
            .one(conn)
            .await?)
    }

    async fn create_item<C: ConnectionTrait>(
        &self,
        conn: &C,
        product_id: Uuid,
        warehouse_id: Uuid,
        unit_cost: Decimal,
    ) -> Result<ItemModel, ServiceError> {
        Ok(ItemActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            warehouse_id: Set(warehouse_id),
            quantity: Set(0),
            reserved_quantity: Set(0),
            unit_cost: Set(unit_cost),
            location: Set(None),
            last_updated: Set(Utc::now()),
        }
        .insert(conn)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn level(quantity: i32, reserved: i32) -> StockLevel {
        StockLevel { quantity, reserved }
    }

    #[test]
    fn receipt_and_return_add_stock() {
        assert_eq!(
            apply_movement(MovementKind::Receipt, level(10, 2), 5).unwrap(),
            level(15, 2)
        );
        assert_eq!(
            apply_movement(MovementKind::Return, level(0, 0), 3).unwrap(),
            level(3, 0)
        );
    }

    #[test]
    fn issue_subtracts_within_available() {
        assert_eq!(
            apply_movement(MovementKind::Issue, level(10, 2), 8).unwrap(),
            level(2, 2)
        );
    }

    #[test]
    fn issue_beyond_available_fails() {
        // 10 on hand but 2 reserved: only 8 can leave.
        let err = apply_movement(MovementKind::Issue, level(10, 2), 9).unwrap_err();
        assert_matches!(err, ServiceError::InsufficientStock(_));
    }

    #[test]
    fn transfer_uses_the_issue_rule_at_the_source() {
        assert_eq!(
            apply_movement(MovementKind::Transfer, level(5, 0), 5).unwrap(),
            level(0, 0)
        );
        let err = apply_movement(MovementKind::Transfer, level(5, 1), 5).unwrap_err();
        assert_matches!(err, ServiceError::InsufficientStock(_));
    }

    #[test]
    fn adjustment_sets_quantity() {
        assert_eq!(
            apply_movement(MovementKind::Adjustment, level(10, 2), 7).unwrap(),
            level(7, 2)
        );
    }

    #[test]
    fn adjustment_cannot_undercut_reservations() {
        let err = apply_movement(MovementKind::Adjustment, level(10, 4), 3).unwrap_err();
        assert_matches!(err, ServiceError::InvalidInput(_));
    }

    #[test]
    fn reservation_needs_available_stock() {
        assert_eq!(
            apply_movement(MovementKind::Reservation, level(10, 8), 2).unwrap(),
            level(10, 10)
        );
        let err = apply_movement(MovementKind::Reservation, level(10, 8), 3).unwrap_err();
        assert_matches!(err, ServiceError::InsufficientStock(_));
    }

    #[test]
    fn release_needs_reserved_stock() {
        assert_eq!(
            apply_movement(MovementKind::Release, level(10, 3), 3).unwrap(),
            level(10, 0)
        );
        let err = apply_movement(MovementKind::Release, level(10, 3), 4).unwrap_err();
        assert_matches!(err, ServiceError::InsufficientReserved(_));
    }
}
