use crate::domain::validate::ValidationErrors;
use crate::storage::document::StoreError;

/// Failure of one lifecycle operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request body did not deserialize into the entity shape.
    #[error("{0}")]
    MalformedRequest(String),

    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    /// The store call failed, timed out, or returned an undecodable document.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}
