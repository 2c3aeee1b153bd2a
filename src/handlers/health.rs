//! Health endpoint

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::handlers::AppState;

/// GET /health — liveness probe reporting upstream reachability
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let status = state.services.health_check().await;

    Json(json!({
        "status": if status.is_healthy() { "ok" } else { "degraded" },
        "store_reachable": status.store_reachable,
        "image_host_configured": status.image_host_configured,
        "version": crate::VERSION,
    }))
}
