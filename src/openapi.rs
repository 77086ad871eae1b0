use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = r#"
# Stockroom back-office API

Warehouse back-office for inventory, orders, finance, and shipment
tracking.

- **Ledger**: accounts, categories, and a double-sided transaction log
  with recomputed balances
- **Debts**: receivables and payables with payment-derived statuses
- **Budgets**: planned figures with actuals computed from the ledger
- **Inventory**: typed stock movements over per-warehouse stock records
- **Stock audits**: counting campaigns with discrepancy reporting
- **Orders**: enforced lifecycle with per-change history
- **Payments**: order payments with a completion cascade
- **Tracking**: carrier statuses, history, and notifications

Only the business-rule endpoints are documented individually; the
remaining CRUD endpoints follow the same envelope.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "ledger", description = "Accounts and transactions"),
        (name = "debts", description = "Receivables and payables"),
        (name = "budgets", description = "Budget tracking"),
        (name = "inventory", description = "Stock and movements"),
        (name = "orders", description = "Order lifecycle"),
        (name = "payments", description = "Order payments"),
        (name = "tracking", description = "Shipment tracking")
    ),
    paths(
        crate::handlers::ledger::record_transaction,
        crate::handlers::ledger::recalculate_balance,
        crate::handlers::debts::record_debt_payment,
        crate::handlers::budgets::budget_performance,
        crate::handlers::inventory::record_movement,
        crate::handlers::orders::create_order,
        crate::handlers::orders::get_order,
        crate::handlers::orders::set_order_status,
        crate::handlers::payments::complete_payment,
        crate::handlers::tracking::update_tracking_status,
    ),
    components(schemas(
        crate::ApiResponse<serde_json::Value>,
        crate::ListQuery,
        crate::errors::ErrorResponse,
        crate::services::ledger::RecordTransactionRequest,
        crate::services::debts::RecordDebtPaymentRequest,
        crate::services::inventory::RecordMovementRequest,
        crate::services::orders::CreateOrderRequest,
        crate::services::orders::OrderItemLine,
        crate::services::orders::SetOrderStatusRequest,
        crate::services::tracking::UpdateTrackingStatusRequest,
    ))
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi as _;

    #[test]
    fn document_includes_business_rule_paths() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("Stockroom API"));
        assert!(json.contains("/api/v1/transactions"));
        assert!(json.contains("/api/v1/movements"));
        assert!(json.contains("/api/v1/orders/{id}/status"));
    }

    #[test]
    fn document_registers_request_body_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc
            .components
            .as_ref()
            .map(|c| c.schemas.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        for name in [
            "RecordTransactionRequest",
            "RecordDebtPaymentRequest",
            "RecordMovementRequest",
            "CreateOrderRequest",
            "OrderItemLine",
            "SetOrderStatusRequest",
            "UpdateTrackingStatusRequest",
        ] {
            assert!(schemas.iter().any(|s| s == name), "missing schema {name}");
        }
    }
}
