use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::repository::CarRepository;

pub fn router() -> Router<CarRepository> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Basic REST API is healthy"
    }))
}
