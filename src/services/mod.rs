pub mod audits;
pub mod budgets;
pub mod catalog;
pub mod debts;
pub mod inventory;
pub mod ledger;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod tracking;
pub mod users;

pub use audits::AuditService;
pub use budgets::BudgetService;
pub use catalog::CatalogService;
pub use debts::DebtService;
pub use inventory::InventoryService;
pub use ledger::LedgerService;
pub use orders::OrderService;
pub use payments::PaymentService;
pub use reports::ReportService;
pub use tracking::TrackingService;
pub use users::UserService;
