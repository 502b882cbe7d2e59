use super::{server_owned, Entity, ObjectId};
use crate::domain::validate::{required, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, validator::Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Pet {
    #[schema(value_type = String, example = "6650a1f2c3d4e5f6a7b8c9d2")]
    #[serde(deserialize_with = "server_owned::object_id")]
    pub id: ObjectId,
    /// Owner identifier, not checked for existence.
    #[validate(custom(function = "required"))]
    pub owner_id: String,
    #[validate(custom(function = "required"))]
    pub name: String,
    #[validate(custom(function = "required"))]
    pub age: i64,
    #[validate(custom(function = "required"))]
    pub pet_type: String,
    #[validate(custom(function = "required"))]
    pub breed: String,
    #[serde(deserialize_with = "server_owned::timestamp")]
    pub creation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetChanges {
    pub owner_id: String,
    pub name: String,
    pub age: i64,
    pub pet_type: String,
    pub breed: String,
}

/// Required fields in declaration order, as named in validation messages.
const REQUIRED: [&str; 5] = ["OwnerId", "Name", "Age", "PetType", "Breed"];

impl Entity for Pet {
    type Changes = PetChanges;

    const COLLECTION: &'static str = "pets";
    const LABEL: &'static str = "Pet";

    fn id(&self) -> ObjectId {
        self.id
    }

    fn stamped(self, id: ObjectId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            creation_date: now,
            ..self
        }
    }

    fn changes(&self) -> PetChanges {
        PetChanges {
            owner_id: self.owner_id.clone(),
            name: self.name.clone(),
            age: self.age,
            pet_type: self.pet_type.clone(),
            breed: self.breed.clone(),
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::collect(
            Self::LABEL,
            &REQUIRED,
            validator::Validate::validate(self),
        )
    }
}
