//! Liveness probe.

use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pelorus-screening",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
