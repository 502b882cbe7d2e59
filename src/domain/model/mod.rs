//! Domain model definitions for the booking entities.

use crate::domain::validate::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod appointment;
pub mod object_id;
pub mod owner;
pub mod partner;
pub mod pet;
pub mod server_owned;

pub use appointment::{Appointment, AppointmentChanges};
pub use object_id::{ObjectId, ObjectIdError};
pub use owner::{Owner, OwnerChanges};
pub use partner::{Partner, PartnerChanges};
pub use pet::{Pet, PetChanges};

/// Trait that defines the contract for any persisted entity.
///
/// This trait allows the lifecycle service to work with any entity without knowing
/// its specific fields. Each entity implementation provides:
/// - Collection name and a human label used in response messages
/// - Server-side stamping of identifier and creation time
/// - The projection onto its mutable fields used for edits
/// - Required-field validation
pub trait Entity: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Partial-update document. Never carries the identifier or the creation time.
    type Changes: Serialize + Send + Sync;

    /// Name of the document-store collection holding this entity.
    const COLLECTION: &'static str;

    /// Capitalized name used in response messages (e.g. `Owner`).
    const LABEL: &'static str;

    fn id(&self) -> ObjectId;

    /// Returns the record with a server-assigned id and creation time,
    /// discarding whatever the client supplied for either.
    fn stamped(self, id: ObjectId, now: DateTime<Utc>) -> Self;

    fn changes(&self) -> Self::Changes;

    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Collection names of every entity, in route-table order.
pub const COLLECTIONS: [&str; 4] = [
    Owner::COLLECTION,
    Partner::COLLECTION,
    Pet::COLLECTION,
    Appointment::COLLECTION,
];
