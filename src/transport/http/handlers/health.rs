use crate::transport::http::types::{AppState, Envelope};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy (store reachable)", body = Envelope),
        (status = 503, description = "Service is unhealthy (store unreachable)", body = Envelope)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.services.ping().await {
        Ok(()) => Envelope::new(StatusCode::OK, "Success", json!({ "status": "ok" })),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            Envelope::new(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Store ping failed: {}", e),
                json!({ "status": "unhealthy" }),
            )
        }
    }
}
