use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Events emitted by the domain services.
///
/// Consumed by the in-process `process_events` loop; there is no external
/// delivery, the stream exists for audit logging and for wiring future
/// consumers without touching the services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Ledger
    TransactionRecorded {
        transaction_id: Uuid,
        transaction_type: String,
        amount: Decimal,
    },
    AccountBalanceRecalculated {
        account_id: Uuid,
        balance: Decimal,
    },

    // Debts
    DebtPaymentRecorded {
        debt_id: Uuid,
        payment_id: Uuid,
        amount: Decimal,
    },
    DebtStatusChanged {
        debt_id: Uuid,
        old_status: String,
        new_status: String,
    },

    // Inventory
    MovementRecorded {
        movement_id: Uuid,
        movement_type: String,
        product_id: Uuid,
        warehouse_id: Uuid,
        quantity: i32,
    },
    AuditStatusChanged {
        audit_id: Uuid,
        old_status: String,
        new_status: String,
    },

    // Orders
    OrderCreated(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: String,
        new_status: String,
    },
    OrderTotalRecalculated {
        order_id: Uuid,
        total_amount: Decimal,
    },
    PaymentCompleted {
        payment_id: Uuid,
        order_id: Uuid,
        amount: Decimal,
    },
    PaymentRefunded {
        payment_id: Uuid,
        order_id: Uuid,
        amount: Decimal,
    },

    // Tracking
    TrackingStatusChanged {
        tracking_id: Uuid,
        old_status: String,
        new_status: String,
    },
    TrackingNotificationCreated {
        notification_id: Uuid,
        tracking_id: Uuid,
        user_id: Uuid,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Consumes domain events and logs them. Spawned from main.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("Event processor started");
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status,
            } => {
                info!(order_id = %order_id, old_status = %old_status, new_status = %new_status, "order status changed");
            }
            Event::PaymentCompleted {
                payment_id,
                order_id,
                amount,
            } => {
                info!(payment_id = %payment_id, order_id = %order_id, amount = %amount, "payment completed");
            }
            Event::MovementRecorded {
                movement_id,
                movement_type,
                quantity,
                ..
            } => {
                info!(movement_id = %movement_id, movement_type = %movement_type, quantity = quantity, "inventory movement recorded");
            }
            other => {
                debug!(event = ?other, "domain event");
            }
        }
    }
    info!("Event processor stopped");
}
