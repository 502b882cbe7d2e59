use crate::domain::model::Owner;
use crate::transport::http::handlers::common;
use crate::transport::http::types::{AppState, Envelope};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/owner",
    tag = "owners",
    request_body = Owner,
    responses(
        (status = 201, description = "Owner created", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn create_owner_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    common::create(&state.services.owners, &body).await
}

#[utoipa::path(
    get,
    path = "/owner/{id}",
    tag = "owners",
    params(("id" = String, Path, description = "Owner id (24 hex characters)")),
    responses(
        (status = 200, description = "Owner found", body = Envelope),
        (status = 500, description = "No such owner or store failure", body = Envelope)
    )
)]
pub async fn get_owner_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::get_by_id(&state.services.owners, &id).await
}

#[utoipa::path(
    put,
    path = "/owner/{id}",
    tag = "owners",
    params(("id" = String, Path, description = "Owner id (24 hex characters)")),
    request_body = Owner,
    responses(
        (status = 200, description = "Owner edited (default record when the id matched nothing)", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn edit_owner_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    common::edit_by_id(&state.services.owners, &id, &body).await
}

#[utoipa::path(
    delete,
    path = "/owner/{id}",
    tag = "owners",
    params(("id" = String, Path, description = "Owner id (24 hex characters)")),
    responses(
        (status = 200, description = "Owner deleted", body = Envelope),
        (status = 404, description = "No such owner", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn delete_owner_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::delete_by_id(&state.services.owners, &id).await
}

#[utoipa::path(
    get,
    path = "/owners",
    tag = "owners",
    responses(
        (status = 200, description = "Every owner", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn list_owners_handler(State(state): State<AppState>) -> impl IntoResponse {
    common::list_all(&state.services.owners).await
}
