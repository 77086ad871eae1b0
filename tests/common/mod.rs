use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseBackend as DbBackend, Statement};
use serde_json::Value;
use stockroom_api::{
    config::AppConfig,
    db,
    entities::{product, warehouse},
    events::{self, EventSender},
    handlers::AppServices,
    services,
    AppState,
};
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

/// Helper harness for spinning up an application state backed by a file
/// SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_file = "stockroom_test.db";
        let _ = std::fs::remove_file(db_file);

        let cfg = AppConfig {
            database_url: format!("sqlite://{db_file}?mode=rwc"),
            host: "127.0.0.1".to_string(),
            port: 18_080,
            environment: "test".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            auto_migrate: true,
            locale: "en_US".to_string(),
            timezone: "UTC".to_string(),
            secret_key_file: ".secret_key_test".to_string(),
            db_max_connections: 1,
            db_min_connections: 1,
            db_connect_timeout_secs: 5,
            db_idle_timeout_secs: 60,
            event_channel_capacity: 256,
            cors_allowed_origins: None,
        };

        let pool = db::establish_connection(&cfg)
            .await
            .expect("failed to create test database");

        // Clean schema for each test run
        let reset_statements = [
            "DROP TABLE IF EXISTS tracking_notifications;",
            "DROP TABLE IF EXISTS tracking_history;",
            "DROP TABLE IF EXISTS tracking_numbers;",
            "DROP TABLE IF EXISTS payments;",
            "DROP TABLE IF EXISTS order_history;",
            "DROP TABLE IF EXISTS order_items;",
            "DROP TABLE IF EXISTS orders;",
            "DROP TABLE IF EXISTS stock_counts;",
            "DROP TABLE IF EXISTS stock_audits;",
            "DROP TABLE IF EXISTS inventory_movements;",
            "DROP TABLE IF EXISTS inventory_items;",
            "DROP TABLE IF EXISTS warehouses;",
            "DROP TABLE IF EXISTS debt_payments;",
            "DROP TABLE IF EXISTS debts;",
            "DROP TABLE IF EXISTS transactions;",
            "DROP TABLE IF EXISTS accounts;",
            "DROP TABLE IF EXISTS products;",
        ];
        for sql in reset_statements {
            let _ = pool
                .execute(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
                .await;
        }

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let sender = Arc::new(event_sender.clone());
        let app_services = AppServices {
            ledger: Arc::new(services::LedgerService::new(
                db_arc.clone(),
                Some(sender.clone()),
            )),
            debts: Arc::new(services::DebtService::new(
                db_arc.clone(),
                Some(sender.clone()),
            )),
            budgets: Arc::new(services::BudgetService::new(db_arc.clone())),
            catalog: Arc::new(services::CatalogService::new(db_arc.clone())),
            inventory: Arc::new(services::InventoryService::new(
                db_arc.clone(),
                Some(sender.clone()),
            )),
            audits: Arc::new(services::AuditService::new(
                db_arc.clone(),
                Some(sender.clone()),
            )),
            orders: Arc::new(services::OrderService::new(
                db_arc.clone(),
                Some(sender.clone()),
            )),
            payments: Arc::new(services::PaymentService::new(
                db_arc.clone(),
                Some(sender.clone()),
            )),
            tracking: Arc::new(services::TrackingService::new(
                db_arc.clone(),
                Some(sender.clone()),
            )),
            reports: Arc::new(services::ReportService::new(db_arc.clone())),
            users: Arc::new(services::UserService::new(db_arc.clone())),
        };

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services: app_services,
        };

        let router = Router::new()
            .route("/health/live", get(stockroom_api::handlers::health::liveness))
            .route(
                "/health/ready",
                get(stockroom_api::handlers::health::readiness),
            )
            .nest("/api/v1", stockroom_api::api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Send a JSON request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn seed_product(&self, name: &str, selling_price: Decimal) -> product::Model {
        self.state
            .services
            .catalog
            .create_product(services::catalog::CreateProductRequest {
                name: name.to_string(),
                sku: Some(format!("sku-{}", Uuid::new_v4())),
                description: None,
                purchase_price: None,
                selling_price: Some(selling_price),
                supplier_id: None,
            })
            .await
            .expect("seed product for tests")
    }

    pub async fn seed_warehouse(&self, name: &str) -> warehouse::Model {
        self.state
            .services
            .inventory
            .create_warehouse(services::inventory::CreateWarehouseRequest {
                name: name.to_string(),
                address: None,
                description: None,
                contact_person: None,
                phone: None,
                email: None,
            })
            .await
            .expect("seed warehouse for tests")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}
