use crate::{
    db::DbPool,
    entities::order::{
        self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel,
        OrderStatus,
    },
    entities::order_history::{
        self, ActiveModel as HistoryActiveModel, Entity as HistoryEntity, Model as HistoryModel,
    },
    entities::order_item::{
        self, ActiveModel as OrderItemActiveModel, Entity as OrderItemEntity,
        Model as OrderItemModel,
    },
    entities::product::Entity as ProductEntity,
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemLine {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order number is required"))]
    pub order_number: String,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_cost: Option<Decimal>,
    #[validate(length(min = 3, max = 3, message = "Currency must be 3 characters"))]
    pub currency: String,
    pub notes: Option<String>,
    #[validate]
    pub items: Vec<OrderItemLine>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetOrderStatusRequest {
    pub status: String,
    pub comment: Option<String>,
    pub changed_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderModel>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub order: OrderModel,
    pub items: Vec<OrderItemModel>,
}

/// Total of an order: the sum of line subtotals plus shipping.
pub(crate) fn order_total(lines: &[(i32, Decimal)], shipping_cost: Decimal) -> Decimal {
    lines
        .iter()
        .map(|(quantity, unit_price)| Decimal::from(*quantity) * *unit_price)
        .sum::<Decimal>()
        + shipping_cost
}

/// Orders with an enforced status table, per-change history rows, and a
/// stored total derived from the line items.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(order_number = %request.order_number))]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderDetailResponse, ServiceError> {
        request.validate()?;

        let txn = self.db_pool.begin().await?;
        let order_id = Uuid::new_v4();
        let shipping_cost = request.shipping_cost.unwrap_or(Decimal::ZERO);

        let mut items = Vec::with_capacity(request.items.len());
        let mut lines = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let product = ProductEntity::find_by_id(line.product_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("product {} not found", line.product_id))
                })?;
            let unit_price = match line.unit_price.or(product.selling_price) {
                Some(price) => price,
                None => {
                    return Err(ServiceError::InvalidInput(format!(
                        "product {} has no selling price; unit price is required",
                        product.id
                    )));
                }
            };
            lines.push((line.quantity, unit_price));
            items.push(OrderItemActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                unit_price: Set(unit_price),
                ..Default::default()
            });
        }

        let order = OrderActiveModel {
            id: Set(order_id),
            order_number: Set(request.order_number),
            status: Set(OrderStatus::Draft.as_str().to_string()),
            customer_name: Set(request.customer_name),
            customer_phone: Set(request.customer_phone),
            customer_email: Set(request.customer_email),
            shipping_address: Set(request.shipping_address),
            shipping_cost: Set(shipping_cost),
            total_amount: Set(order_total(&lines, shipping_cost)),
            currency: Set(request.currency),
            notes: Set(request.notes),
            paid_at: Set(None),
            shipped_at: Set(None),
            delivered_at: Set(None),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            inserted.push(item.insert(&txn).await?);
        }

        self.append_history(&txn, order_id, None, OrderStatus::Draft.as_str(), None, request.created_by)
            .await?;

        txn.commit().await?;

        info!(order_id = %order_id, "order created");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::OrderCreated(order_id)).await {
                warn!(error = %e, "failed to send order created event");
            }
        }

        Ok(OrderDetailResponse {
            order,
            items: inserted,
        })
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderDetailResponse, ServiceError> {
        let order = OrderEntity::find_by_id(order_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {} not found", order_id)))?;
        let items = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .order_by_asc(order_item::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(OrderDetailResponse { order, items })
    }

    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        status: Option<String>,
        page: u64,
        per_page: u64,
    ) -> Result<OrderListResponse, ServiceError> {
        let mut query = OrderEntity::find().order_by_desc(order::Column::CreatedAt);
        if let Some(status) = status {
            let status = OrderStatus::from_str(&status).ok_or_else(|| {
                ServiceError::InvalidStatus(format!("unknown order status: {}", status))
            })?;
            query = query.filter(order::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(OrderListResponse {
            orders,
            total,
            page,
            per_page,
        })
    }

    /// Adds a line item to an order still being assembled and restores
    /// the stored total.
    #[instrument(skip(self, line), fields(order_id = %order_id, product_id = %line.product_id))]
    pub async fn add_item(
        &self,
        order_id: Uuid,
        line: OrderItemLine,
    ) -> Result<OrderDetailResponse, ServiceError> {
        line.validate()?;

        let txn = self.db_pool.begin().await?;
        let order = self.load_editable(&txn, order_id).await?;

        let product = ProductEntity::find_by_id(line.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("product {} not found", line.product_id))
            })?;
        let unit_price = match line.unit_price.or(product.selling_price) {
            Some(price) => price,
            None => {
                return Err(ServiceError::InvalidInput(format!(
                    "product {} has no selling price; unit price is required",
                    product.id
                )));
            }
        };

        OrderItemActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            unit_price: Set(unit_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        self.store_total(&txn, order).await?;
        txn.commit().await?;

        self.get_order(order_id).await
    }

    #[instrument(skip(self), fields(order_id = %order_id, item_id = %item_id))]
    pub async fn remove_item(
        &self,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<OrderDetailResponse, ServiceError> {
        let txn = self.db_pool.begin().await?;
        let order = self.load_editable(&txn, order_id).await?;

        let item = OrderItemEntity::find_by_id(item_id)
            .one(&txn)
            .await?
            .filter(|item| item.order_id == order_id)
            .ok_or_else(|| {
                ServiceError::NotFound(format!("item {} not found on order {}", item_id, order_id))
            })?;
        item.delete(&txn).await?;

        self.store_total(&txn, order).await?;
        txn.commit().await?;

        self.get_order(order_id).await
    }

    /// Recomputes the stored total from the current line items. Exposed
    /// as a bulk repair action.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn recalculate_total(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        let txn = self.db_pool.begin().await?;
        let order = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {} not found", order_id)))?;
        let updated = self.store_total(&txn, order).await?;
        txn.commit().await?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::OrderTotalRecalculated {
                    order_id,
                    total_amount: updated.total_amount,
                })
                .await
            {
                warn!(error = %e, "failed to send total recalculated event");
            }
        }

        Ok(updated)
    }

    /// Moves an order to a new status, writing the history row in the
    /// same transaction. Lifecycle timestamps are stamped the first time
    /// the order reaches the matching status and never overwritten.
    #[instrument(skip(self, request), fields(order_id = %order_id, new_status = %request.status))]
    pub async fn set_status(
        &self,
        order_id: Uuid,
        request: SetOrderStatusRequest,
    ) -> Result<OrderModel, ServiceError> {
        let next = OrderStatus::from_str(&request.status).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown order status: {}", request.status))
        })?;

        let txn = self.db_pool.begin().await?;

        let order = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {} not found", order_id)))?;
        let current = OrderStatus::from_str(&order.status).ok_or_else(|| {
            ServiceError::InternalError(format!(
                "order {} has unknown status {}",
                order_id, order.status
            ))
        })?;

        if !current.can_transition(next) {
            return Err(ServiceError::InvalidTransition(format!(
                "cannot move order from {} to {}",
                current.as_str(),
                next.as_str()
            )));
        }

        if current == next {
            txn.commit().await?;
            return Ok(order);
        }

        let old_status = order.status.clone();
        let now = Utc::now();
        let paid_at = order.paid_at;
        let shipped_at = order.shipped_at;
        let delivered_at = order.delivered_at;

        let mut active: OrderActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        match next {
            OrderStatus::Paid if paid_at.is_none() => active.paid_at = Set(Some(now)),
            OrderStatus::Shipped if shipped_at.is_none() => active.shipped_at = Set(Some(now)),
            OrderStatus::Delivered if delivered_at.is_none() => {
                active.delivered_at = Set(Some(now))
            }
            _ => {}
        }
        let updated = active.update(&txn).await?;

        self.append_history(
            &txn,
            order_id,
            Some(old_status.clone()),
            next.as_str(),
            request.comment,
            request.changed_by,
        )
        .await?;

        txn.commit().await?;

        info!(order_id = %order_id, old_status = %old_status, new_status = %updated.status, "order status changed");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::OrderStatusChanged {
                    order_id,
                    old_status,
                    new_status: updated.status.clone(),
                })
                .await
            {
                warn!(error = %e, "failed to send order status event");
            }
        }

        Ok(updated)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn mark_paid(&self, order_id: Uuid, changed_by: Option<Uuid>) -> Result<OrderModel, ServiceError> {
        self.set_status(
            order_id,
            SetOrderStatusRequest {
                status: OrderStatus::Paid.as_str().to_string(),
                comment: None,
                changed_by,
            },
        )
        .await
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn mark_shipped(&self, order_id: Uuid, changed_by: Option<Uuid>) -> Result<OrderModel, ServiceError> {
        self.set_status(
            order_id,
            SetOrderStatusRequest {
                status: OrderStatus::Shipped.as_str().to_string(),
                comment: None,
                changed_by,
            },
        )
        .await
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn mark_delivered(&self, order_id: Uuid, changed_by: Option<Uuid>) -> Result<OrderModel, ServiceError> {
        self.set_status(
            order_id,
            SetOrderStatusRequest {
                status: OrderStatus::Delivered.as_str().to_string(),
                comment: None,
                changed_by,
            },
        )
        .await
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel(
        &self,
        order_id: Uuid,
        reason: Option<String>,
        changed_by: Option<Uuid>,
    ) -> Result<OrderModel, ServiceError> {
        self.set_status(
            order_id,
            SetOrderStatusRequest {
                status: OrderStatus::Cancelled.as_str().to_string(),
                comment: reason,
                changed_by,
            },
        )
        .await
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn history(&self, order_id: Uuid) -> Result<Vec<HistoryModel>, ServiceError> {
        OrderEntity::find_by_id(order_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {} not found", order_id)))?;
        Ok(HistoryEntity::find()
            .filter(order_history::Column::OrderId.eq(order_id))
            .order_by_asc(order_history::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    async fn load_editable<C: ConnectionTrait>(
        &self,
        conn: &C,
        order_id: Uuid,
    ) -> Result<OrderModel, ServiceError> {
        let order = OrderEntity::find_by_id(order_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {} not found", order_id)))?;
        match OrderStatus::from_str(&order.status) {
            Some(OrderStatus::Draft) | Some(OrderStatus::Pending) => Ok(order),
            Some(other) => Err(ServiceError::InvalidOperation(format!(
                "line items cannot change once the order is {}",
                other.as_str()
            ))),
            None => Err(ServiceError::InternalError(format!(
                "order {} has unknown status {}",
                order_id, order.status
            ))),
        }
    }

    async fn store_total<C: ConnectionTrait>(
        &self,
        conn: &C,
        order: OrderModel,
    ) -> Result<OrderModel, ServiceError> {
        let items = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(order.id))
            .all(conn)
            .await?;
        let lines: Vec<(i32, Decimal)> =
            items.iter().map(|i| (i.quantity, i.unit_price)).collect();
        let total = order_total(&lines, order.shipping_cost);

        let mut active: OrderActiveModel = order.into();
        active.total_amount = Set(total);
        Ok(active.update(conn).await?)
    }

    async fn append_history<C: ConnectionTrait>(
        &self,
        conn: &C,
        order_id: Uuid,
        old_status: Option<String>,
        new_status: &str,
        comment: Option<String>,
        changed_by: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        HistoryActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            old_status: Set(old_status),
            new_status: Set(new_status.to_string()),
            comment: Set(comment),
            changed_by: Set(changed_by),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::order_total;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn total_is_lines_plus_shipping() {
        let lines = [(2, dec!(10.50)), (1, dec!(4.00))];
        assert_eq!(order_total(&lines, dec!(5.00)), dec!(30.00));
    }

    #[test]
    fn empty_order_totals_to_shipping() {
        assert_eq!(order_total(&[], dec!(7.50)), dec!(7.50));
        assert_eq!(order_total(&[], Decimal::ZERO), Decimal::ZERO);
    }
}
