use crate::domain::model::{Appointment, Owner, Partner, Pet};
use crate::storage::document::InsertOneResult;
use crate::transport::http::handlers::{appointment, health, owner, partner, pet};
use crate::transport::http::types::{AppState, Envelope, EnvelopeData};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        owner::create_owner_handler,
        owner::get_owner_handler,
        owner::edit_owner_handler,
        owner::delete_owner_handler,
        owner::list_owners_handler,
        partner::create_partner_handler,
        partner::get_partner_handler,
        partner::edit_partner_handler,
        partner::delete_partner_handler,
        partner::list_partners_handler,
        pet::create_pet_handler,
        pet::get_pet_handler,
        pet::edit_pet_handler,
        pet::delete_pet_handler,
        pet::list_pets_handler,
        appointment::create_appointment_handler,
        appointment::get_appointment_handler,
        appointment::edit_appointment_handler,
        appointment::delete_appointment_handler,
        appointment::list_appointments_handler
    ),
    components(schemas(
        Envelope,
        EnvelopeData,
        InsertOneResult,
        Owner,
        Partner,
        Pet,
        Appointment
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/owner", post(owner::create_owner_handler))
        .route(
            "/owner/:id",
            get(owner::get_owner_handler)
                .put(owner::edit_owner_handler)
                .delete(owner::delete_owner_handler),
        )
        .route("/owners", get(owner::list_owners_handler))
        .route("/partner", post(partner::create_partner_handler))
        .route(
            "/partner/:id",
            get(partner::get_partner_handler)
                .put(partner::edit_partner_handler)
                .delete(partner::delete_partner_handler),
        )
        .route("/partners", get(partner::list_partners_handler))
        .route("/pet", post(pet::create_pet_handler))
        .route(
            "/pet/:id",
            get(pet::get_pet_handler)
                .put(pet::edit_pet_handler)
                .delete(pet::delete_pet_handler),
        )
        .route("/pets", get(pet::list_pets_handler))
        .route(
            "/appointment",
            post(appointment::create_appointment_handler),
        )
        .route(
            "/appointment/:id",
            get(appointment::get_appointment_handler)
                .put(appointment::edit_appointment_handler)
                .delete(appointment::delete_appointment_handler),
        )
        .route("/appointments", get(appointment::list_appointments_handler))
        .with_state(app_state)
}
