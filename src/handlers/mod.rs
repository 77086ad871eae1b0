pub mod audits;
pub mod budgets;
pub mod catalog;
pub mod debts;
pub mod health;
pub mod inventory;
pub mod ledger;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod tracking;
pub mod users;

use crate::services::{
    AuditService, BudgetService, CatalogService, DebtService, InventoryService, LedgerService,
    OrderService, PaymentService, ReportService, TrackingService, UserService,
};
use std::sync::Arc;

/// One shared handle per domain service, cloned into the router state.
#[derive(Clone)]
pub struct AppServices {
    pub ledger: Arc<LedgerService>,
    pub debts: Arc<DebtService>,
    pub budgets: Arc<BudgetService>,
    pub catalog: Arc<CatalogService>,
    pub inventory: Arc<InventoryService>,
    pub audits: Arc<AuditService>,
    pub orders: Arc<OrderService>,
    pub payments: Arc<PaymentService>,
    pub tracking: Arc<TrackingService>,
    pub reports: Arc<ReportService>,
    pub users: Arc<UserService>,
}
