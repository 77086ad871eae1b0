pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Common query parameters for paginated list endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}
fn default_limit() -> u64 {
    20
}

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Standard JSON result type for handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

pub fn api_v1_routes() -> Router<AppState> {
    let ledger = Router::new()
        .route(
            "/accounts",
            get(handlers::ledger::list_accounts).post(handlers::ledger::create_account),
        )
        .route(
            "/accounts/:id",
            get(handlers::ledger::get_account).put(handlers::ledger::update_account),
        )
        .route(
            "/accounts/:id/recalculate",
            post(handlers::ledger::recalculate_balance),
        )
        .route(
            "/categories",
            get(handlers::ledger::list_categories).post(handlers::ledger::create_category),
        )
        .route(
            "/transactions",
            get(handlers::ledger::list_transactions).post(handlers::ledger::record_transaction),
        )
        .route(
            "/transactions/:id",
            get(handlers::ledger::get_transaction).delete(handlers::ledger::delete_transaction),
        );

    let debts = Router::new()
        .route(
            "/debts",
            get(handlers::debts::list_debts).post(handlers::debts::create_debt),
        )
        .route("/debts/:id", get(handlers::debts::get_debt))
        .route(
            "/debts/:id/payments",
            get(handlers::debts::list_debt_payments).post(handlers::debts::record_debt_payment),
        )
        .route("/debts/:id/mark-paid", post(handlers::debts::mark_debt_paid))
        .route("/debts/:id/cancel", post(handlers::debts::cancel_debt));

    let budgets = Router::new()
        .route(
            "/budgets",
            get(handlers::budgets::list_budgets).post(handlers::budgets::create_budget),
        )
        .route("/budgets/:id", get(handlers::budgets::get_budget))
        .route(
            "/budgets/:id/categories",
            put(handlers::budgets::set_budget_category),
        )
        .route(
            "/budgets/:id/deactivate",
            post(handlers::budgets::deactivate_budget),
        )
        .route(
            "/budgets/:id/performance",
            get(handlers::budgets::budget_performance),
        );

    let catalog = Router::new()
        .route(
            "/suppliers",
            get(handlers::catalog::list_suppliers).post(handlers::catalog::create_supplier),
        )
        .route("/suppliers/:id", get(handlers::catalog::get_supplier))
        .route(
            "/suppliers/:id/deactivate",
            post(handlers::catalog::deactivate_supplier),
        )
        .route(
            "/products",
            get(handlers::catalog::list_products).post(handlers::catalog::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::catalog::get_product).put(handlers::catalog::update_product),
        );

    let inventory = Router::new()
        .route(
            "/warehouses",
            get(handlers::inventory::list_warehouses).post(handlers::inventory::create_warehouse),
        )
        .route("/warehouses/:id", get(handlers::inventory::get_warehouse))
        .route("/stock", get(handlers::inventory::list_stock))
        .route("/stock/:id", get(handlers::inventory::get_stock_item))
        .route("/stock/:id/reserve-one", post(handlers::inventory::reserve_one))
        .route("/stock/:id/release-one", post(handlers::inventory::release_one))
        .route(
            "/movements",
            get(handlers::inventory::list_movements).post(handlers::inventory::record_movement),
        );

    let audits = Router::new()
        .route(
            "/audits",
            get(handlers::audits::list_audits).post(handlers::audits::create_audit),
        )
        .route("/audits/:id", get(handlers::audits::get_audit))
        .route("/audits/:id/start", post(handlers::audits::start_audit))
        .route("/audits/:id/complete", post(handlers::audits::complete_audit))
        .route("/audits/:id/cancel", post(handlers::audits::cancel_audit))
        .route(
            "/audits/:id/counts",
            get(handlers::audits::list_counts).post(handlers::audits::record_count),
        )
        .route(
            "/audits/:id/discrepancies",
            get(handlers::audits::list_discrepancies),
        );

    let orders = Router::new()
        .route(
            "/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/orders/:id", get(handlers::orders::get_order))
        .route("/orders/:id/items", post(handlers::orders::add_order_item))
        .route(
            "/orders/:id/items/:item_id",
            delete(handlers::orders::remove_order_item),
        )
        .route("/orders/:id/status", put(handlers::orders::set_order_status))
        .route("/orders/:id/mark-paid", post(handlers::orders::mark_order_paid))
        .route(
            "/orders/:id/mark-shipped",
            post(handlers::orders::mark_order_shipped),
        )
        .route(
            "/orders/:id/mark-delivered",
            post(handlers::orders::mark_order_delivered),
        )
        .route("/orders/:id/cancel", post(handlers::orders::cancel_order))
        .route(
            "/orders/:id/recalculate-total",
            post(handlers::orders::recalculate_order_total),
        )
        .route("/orders/:id/history", get(handlers::orders::order_history));

    let payments = Router::new()
        .route(
            "/payments",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route("/payments/:id", get(handlers::payments::get_payment))
        .route(
            "/payments/:id/complete",
            post(handlers::payments::complete_payment),
        )
        .route("/payments/:id/refund", post(handlers::payments::refund_payment))
        .route("/payments/:id/fail", post(handlers::payments::fail_payment));

    let tracking = Router::new()
        .route(
            "/tracking/companies",
            get(handlers::tracking::list_tracking_companies)
                .post(handlers::tracking::create_tracking_company),
        )
        .route(
            "/tracking",
            get(handlers::tracking::list_tracking_numbers)
                .post(handlers::tracking::create_tracking_number),
        )
        .route(
            "/tracking/problematic",
            get(handlers::tracking::list_problematic),
        )
        .route("/tracking/:id", get(handlers::tracking::get_tracking_number))
        .route(
            "/tracking/:id/status",
            put(handlers::tracking::update_tracking_status),
        )
        .route("/tracking/:id/archive", post(handlers::tracking::archive_tracking))
        .route(
            "/tracking/:id/mark-problematic",
            post(handlers::tracking::mark_tracking_problematic),
        )
        .route(
            "/tracking/:id/mark-delivered",
            post(handlers::tracking::mark_tracking_delivered),
        )
        .route("/tracking/:id/history", get(handlers::tracking::tracking_history))
        .route(
            "/notifications",
            get(handlers::tracking::list_notifications),
        )
        .route(
            "/notifications/:id/read",
            post(handlers::tracking::mark_notification_read),
        )
        .route(
            "/notifications/:id/unread",
            post(handlers::tracking::mark_notification_unread),
        );

    let reports = Router::new()
        .route(
            "/report-templates",
            get(handlers::reports::list_templates).post(handlers::reports::create_template),
        )
        .route("/report-templates/:id", get(handlers::reports::get_template))
        .route(
            "/reports",
            get(handlers::reports::list_reports).post(handlers::reports::create_report),
        )
        .route("/reports/:id", get(handlers::reports::get_report))
        .route("/reports/:id/generate", post(handlers::reports::generate_report))
        .route(
            "/report-schedules",
            get(handlers::reports::list_schedules).post(handlers::reports::create_schedule),
        )
        .route(
            "/report-schedules/:id/activate",
            post(handlers::reports::activate_schedule),
        )
        .route(
            "/report-schedules/:id/deactivate",
            post(handlers::reports::deactivate_schedule),
        )
        .route(
            "/dashboards",
            get(handlers::reports::list_dashboards).post(handlers::reports::create_dashboard),
        )
        .route(
            "/dashboards/:id",
            delete(handlers::reports::delete_dashboard),
        );

    let users = Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::users::get_user).put(handlers::users::update_user),
        )
        .route(
            "/users/:id/activity",
            get(handlers::users::list_user_activity).post(handlers::users::log_user_activity),
        );

    Router::new()
        .merge(ledger)
        .merge(debts)
        .merge(budgets)
        .merge(catalog)
        .merge(inventory)
        .merge(audits)
        .merge(orders)
        .merge(payments)
        .merge(tracking)
        .merge(reports)
        .merge(users)
}
