use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::storage::UPLOADS_DIR_NAME;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Dentit web service",
        "version": version,
        "endpoints": {
            "health": "GET /health",
            "plans": "GET /plans?patientId=, POST /plans",
            "attachments": "GET /attachments?transformId=, POST /attachments",
            "uploads": "GET /uploads/*path",
            "session_documents": "GET /session-documents/*path"
        }
    }))
}

/// GET /health - Database reachability and storage status
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let uploads = state.storage.path().join(UPLOADS_DIR_NAME).is_dir();

    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
                "uploads": uploads
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                    "database_error": e.to_string(),
                    "uploads": uploads
                })),
            )
        }
    }
}
