use crate::config::AppConfig;
use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Establishes a connection pool using the application's pool settings.
pub async fn establish_connection(cfg: &AppConfig) -> Result<DbPool, anyhow::Error> {
    let mut options = ConnectOptions::new(cfg.database_url.clone());
    options
        .max_connections(cfg.db_max_connections)
        .min_connections(cfg.db_min_connections)
        .connect_timeout(Duration::from_secs(cfg.db_connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.db_idle_timeout_secs))
        .sqlx_logging(cfg.is_development());

    let pool = Database::connect(options)
        .await
        .context("failed to connect to the database")?;

    info!(
        max_connections = cfg.db_max_connections,
        "Database connection established"
    );
    Ok(pool)
}

/// Runs the embedded migrations to bring the schema up to date.
pub async fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error> {
    crate::migrator::Migrator::up(pool, None)
        .await
        .context("failed to run database migrations")?;
    info!("Database migrations applied");
    Ok(())
}
