use crate::app::Services;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

/// Uniform response body: `{status, message, data: {data}}`.
///
/// On failure `data.data` holds the error's diagnostic string instead of a payload.
#[derive(Serialize, Debug, ToSchema)]
pub struct Envelope {
    pub status: u16,
    pub message: String,
    pub data: EnvelopeData,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct EnvelopeData {
    #[schema(value_type = Object)]
    pub data: JsonValue,
}

impl Envelope {
    pub fn new<T: Serialize>(status: StatusCode, message: impl Into<String>, payload: T) -> Self {
        let data = serde_json::to_value(payload)
            .unwrap_or_else(|e| JsonValue::String(format!("failed to encode payload: {}", e)));
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: EnvelopeData { data },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
