// src/server/routes.rs
// This file can contain additional route configurations if needed
// For now, all routes are defined in their respective API modules

pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "company-scraper-api"
        }))
    }
}
