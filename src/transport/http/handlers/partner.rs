use crate::domain::model::Partner;
use crate::transport::http::handlers::common;
use crate::transport::http::types::{AppState, Envelope};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/partner",
    tag = "partners",
    request_body = Partner,
    responses(
        (status = 201, description = "Partner created", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn create_partner_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    common::create(&state.services.partners, &body).await
}

#[utoipa::path(
    get,
    path = "/partner/{id}",
    tag = "partners",
    params(("id" = String, Path, description = "Partner id (24 hex characters)")),
    responses(
        (status = 200, description = "Partner found", body = Envelope),
        (status = 500, description = "No such partner or store failure", body = Envelope)
    )
)]
pub async fn get_partner_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::get_by_id(&state.services.partners, &id).await
}

#[utoipa::path(
    put,
    path = "/partner/{id}",
    tag = "partners",
    params(("id" = String, Path, description = "Partner id (24 hex characters)")),
    request_body = Partner,
    responses(
        (status = 200, description = "Partner edited (default record when the id matched nothing)", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn edit_partner_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    common::edit_by_id(&state.services.partners, &id, &body).await
}

#[utoipa::path(
    delete,
    path = "/partner/{id}",
    tag = "partners",
    params(("id" = String, Path, description = "Partner id (24 hex characters)")),
    responses(
        (status = 200, description = "Partner deleted", body = Envelope),
        (status = 404, description = "No such partner", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn delete_partner_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::delete_by_id(&state.services.partners, &id).await
}

#[utoipa::path(
    get,
    path = "/partners",
    tag = "partners",
    responses(
        (status = 200, description = "Every partner", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn list_partners_handler(State(state): State<AppState>) -> impl IntoResponse {
    common::list_all(&state.services.partners).await
}
