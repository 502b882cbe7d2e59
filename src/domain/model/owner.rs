use super::{server_owned, Entity, ObjectId};
use crate::domain::validate::{required, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A pet owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, validator::Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Owner {
    #[schema(value_type = String, example = "6650a1f2c3d4e5f6a7b8c9d0")]
    #[serde(deserialize_with = "server_owned::object_id")]
    pub id: ObjectId,
    #[validate(custom(function = "required"))]
    pub name: String,
    #[validate(custom(function = "required"))]
    pub last_name: String,
    #[validate(custom(function = "required"))]
    pub id_number: i64,
    #[validate(custom(function = "required"))]
    pub phone: i64,
    #[validate(custom(function = "required"))]
    pub email: String,
    #[serde(deserialize_with = "server_owned::timestamp")]
    pub creation_date: DateTime<Utc>,
    /// Pet identifiers, not checked for existence.
    pub pets: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerChanges {
    pub name: String,
    pub last_name: String,
    pub id_number: i64,
    pub phone: i64,
    pub email: String,
    pub pets: Vec<String>,
}

/// Required fields in declaration order, as named in validation messages.
const REQUIRED: [&str; 5] = ["Name", "LastName", "IdNumber", "Phone", "Email"];

impl Entity for Owner {
    type Changes = OwnerChanges;

    const COLLECTION: &'static str = "owners";
    const LABEL: &'static str = "Owner";

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

    fn changes(&self) -> OwnerChanges {
        OwnerChanges {
            name: self.name.clone(),
            last_name: self.last_name.clone(),
            id_number: self.id_number,
            phone: self.phone,
            email: self.email.clone(),
            pets: self.pets.clone(),
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
