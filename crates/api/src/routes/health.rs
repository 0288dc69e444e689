//! Health check route handler.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

/// `GET /api/health` - liveness plus a timestamp. Does not check
/// dependencies.
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
