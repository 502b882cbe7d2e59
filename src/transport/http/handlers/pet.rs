use crate::domain::model::Pet;
use crate::transport::http::handlers::common;
use crate::transport::http::types::{AppState, Envelope};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/pet",
    tag = "pets",
    request_body = Pet,
    responses(
        (status = 201, description = "Pet created", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn create_pet_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    common::create(&state.services.pets, &body).await
}

#[utoipa::path(
    get,
    path = "/pet/{id}",
    tag = "pets",
    params(("id" = String, Path, description = "Pet id (24 hex characters)")),
    responses(
        (status = 200, description = "Pet found", body = Envelope),
        (status = 500, description = "No such pet or store failure", body = Envelope)
    )
)]
pub async fn get_pet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::get_by_id(&state.services.pets, &id).await
}

#[utoipa::path(
    put,
    path = "/pet/{id}",
    tag = "pets",
    params(("id" = String, Path, description = "Pet id (24 hex characters)")),
    request_body = Pet,
    responses(
        (status = 200, description = "Pet edited (default record when the id matched nothing)", body = Envelope),
        (status = 400, description = "Malformed body or missing required fields", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn edit_pet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    common::edit_by_id(&state.services.pets, &id, &body).await
}

#[utoipa::path(
    delete,
    path = "/pet/{id}",
    tag = "pets",
    params(("id" = String, Path, description = "Pet id (24 hex characters)")),
    responses(
        (status = 200, description = "Pet deleted", body = Envelope),
        (status = 404, description = "No such pet", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn delete_pet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    common::delete_by_id(&state.services.pets, &id).await
}

#[utoipa::path(
    get,
    path = "/pets",
    tag = "pets",
    responses(
        (status = 200, description = "Every pet", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn list_pets_handler(State(state): State<AppState>) -> impl IntoResponse {
    common::list_all(&state.services.pets).await
}
