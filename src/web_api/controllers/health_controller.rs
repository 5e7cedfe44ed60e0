use axum::Json;

use crate::health_response::HealthResponse;

pub struct HealthController {}

impl HealthController {
    pub async fn get() -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}
