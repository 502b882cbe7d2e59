//! Envelope mapping shared by the four resource handlers.
//!
//! Status codes and messages are kept stable for existing clients, asymmetries included:
//! a missing id on read is a 500, on delete a 404, and on edit a 200 with a default
//! record.

use crate::app::{ResourceService, ServiceError};
use crate::domain::model::Entity;
use crate::transport::http::types::Envelope;
use axum::http::StatusCode;

pub const BODY_INVALID: &str = "Error: the request body is invalid, please check it again.";
pub const FIELDS_INVALID: &str = "Error: some fields could be invalid.";
pub const READ_OK: &str = "The operation was successfully.";
pub const SUCCESS: &str = "Success";
pub const ERROR: &str = "Error";

/// Maps body-level failures to 400; everything else to `fallback` with the error text.
fn failure<E: Entity>(op: &str, err: ServiceError, fallback: (StatusCode, String)) -> Envelope {
    match err {
        ServiceError::MalformedRequest(detail) => {
            tracing::warn!("{} {}: malformed body: {}", op, E::LABEL, detail);
            Envelope::new(StatusCode::BAD_REQUEST, BODY_INVALID, detail)
        }
        ServiceError::ValidationFailed(errors) => {
            tracing::warn!(
                "{} {}: missing required fields {:?}",
                op,
                E::LABEL,
                errors.fields()
            );
            Envelope::new(StatusCode::BAD_REQUEST, FIELDS_INVALID, errors.to_string())
        }
        ServiceError::NotFound(detail) => {
            tracing::warn!("{} {}: {}", op, E::LABEL, detail);
            Envelope::new(fallback.0, fallback.1, detail)
        }
        ServiceError::Persistence(e) => {
            tracing::error!("{} {}: store failure: {}", op, E::LABEL, e);
            Envelope::new(fallback.0, fallback.1, e.to_string())
        }
    }
}

pub async fn create<E: Entity>(service: &ResourceService<E>, body: &[u8]) -> Envelope {
    match service.create(body).await {
        Ok(ack) => {
            tracing::info!("created {} {}", E::LABEL, ack.inserted_id);
            Envelope::new(
                StatusCode::CREATED,
                format!("A new {} was created successfully.", E::LABEL),
                ack,
            )
        }
        Err(e) => failure::<E>(
            "create",
            e,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: The {} creation process failed.", E::LABEL),
            ),
        ),
    }
}

pub async fn get_by_id<E: Entity>(service: &ResourceService<E>, id: &str) -> Envelope {
    match service.get_by_id(id).await {
        Ok(record) => Envelope::new(StatusCode::OK, READ_OK, record),
        Err(e) => failure::<E>(
            "get",
            e,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: invalid {} ID.", E::LABEL.to_lowercase()),
            ),
        ),
    }
}

pub async fn edit_by_id<E: Entity>(service: &ResourceService<E>, id: &str, body: &[u8]) -> Envelope {
    match service.edit_by_id(id, body).await {
        Ok(record) => Envelope::new(
            StatusCode::OK,
            format!("The {} with the ID {} was edited correctly.", E::LABEL, id),
            record,
        ),
        Err(e) => failure::<E>(
            "edit",
            e,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: The {} edit process failed.", E::LABEL),
            ),
        ),
    }
}

pub async fn delete_by_id<E: Entity>(service: &ResourceService<E>, id: &str) -> Envelope {
    match service.delete_by_id(id).await {
        Ok(()) => {
            tracing::info!("deleted {} {}", E::LABEL, id);
            Envelope::new(
                StatusCode::OK,
                SUCCESS,
                format!("The {} was deleted successfully.", E::LABEL),
            )
        }
        Err(e @ ServiceError::NotFound(_)) => {
            failure::<E>("delete", e, (StatusCode::NOT_FOUND, ERROR.to_string()))
        }
        Err(e) => failure::<E>(
            "delete",
            e,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: There is no {} with that ID. ", E::LABEL.to_lowercase()),
            ),
        ),
    }
}

pub async fn list_all<E: Entity>(service: &ResourceService<E>) -> Envelope {
    match service.list_all().await {
        Ok(records) => Envelope::new(StatusCode::OK, SUCCESS, records),
        Err(e) => failure::<E>(
            "list",
            e,
            (StatusCode::INTERNAL_SERVER_ERROR, ERROR.to_string()),
        ),
    }
}
