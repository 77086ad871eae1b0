use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::{ConnectionTrait, Statement};
use serde_json::json;

use crate::AppState;

/// Liveness probe: the process is up.
pub async fn liveness() -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Readiness probe: the database answers a trivial query.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.db.get_database_backend();
    let probe = state
        .db
        .execute(Statement::from_string(backend, "SELECT 1".to_owned()))
        .await;

    match probe {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "database": "up",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "database": "down",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })),
            )
        }
    }
}
