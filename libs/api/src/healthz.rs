use axum::Json;
use serde_json::{json, Value};

pub(super) async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
