use crate::domain::model::Appointment;
use crate::transport::http::handlers::common;
use crate::transport::http::types::{AppState, Envelope};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/appointment",
    tag = "appointments",
    request_body = Appointment,
    responses(
        (status = 201, description = "Appointment created", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn create_appointment_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    common::create(&state.services.appointments, &body).await
}

#[utoipa::path(
    get,
    path = "/appointment/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id (24 hex characters)")),
    responses(
        (status = 200, description = "Appointment found", body = Envelope),
        (status = 500, description = "No such appointment or store failure", body = Envelope)
    )
)]
pub async fn get_appointment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::get_by_id(&state.services.appointments, &id).await
}

#[utoipa::path(
    put,
    path = "/appointment/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id (24 hex characters)")),
    request_body = Appointment,
    responses(
        (status = 200, description = "Appointment edited (default record when the id matched nothing)", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn edit_appointment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    common::edit_by_id(&state.services.appointments, &id, &body).await
}

#[utoipa::path(
    delete,
    path = "/appointment/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id (24 hex characters)")),
    responses(
        (status = 200, description = "Appointment deleted", body = Envelope),
        (status = 404, description = "No such appointment", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn delete_appointment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::delete_by_id(&state.services.appointments, &id).await
}

#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointments",
    responses(
        (status = 200, description = "Every appointment", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn list_appointments_handler(State(state): State<AppState>) -> impl IntoResponse {
    common::list_all(&state.services.appointments).await
}
