use super::{server_owned, Entity, ObjectId};
use crate::domain::validate::{required, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A booked service for one pet with one partner.
///
/// `date` is stamped by the server when the appointment is created and is not
/// editable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, validator::Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Appointment {
    #[schema(value_type = String, example = "6650a1f2c3d4e5f6a7b8c9d3")]
    #[serde(deserialize_with = "server_owned::object_id")]
    pub id: ObjectId,
    #[validate(custom(function = "required"))]
    pub owner_id: String,
    #[validate(custom(function = "required"))]
    pub pet_id: String,
    #[validate(custom(function = "required"))]
    pub partner_id: String,
    #[validate(custom(function = "required"))]
    pub service: String,
    #[validate(custom(function = "required"))]
    pub amount: f64,
    #[validate(custom(function = "required"))]
    pub payment_type: String,
    #[serde(deserialize_with = "server_owned::timestamp")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    pub owner_id: String,
    pub pet_id: String,
    pub partner_id: String,
    pub service: String,
    pub amount: f64,
    pub payment_type: String,
}

/// Required fields in declaration order, as named in validation messages.
const REQUIRED: [&str; 6] = ["OwnerId", "PetId", "PartnerId", "Service", "Amount", "PaymentType"];

impl Entity for Appointment {
    type Changes = AppointmentChanges;

    const COLLECTION: &'static str = "appointments";
    const LABEL: &'static str = "Appointment";

    fn id(&self) -> ObjectId {
        self.id
    }

    fn stamped(self, id: ObjectId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            date: now,
            ..self
        }
    }

    fn changes(&self) -> AppointmentChanges {
        AppointmentChanges {
            owner_id: self.owner_id.clone(),
            pet_id: self.pet_id.clone(),
            partner_id: self.partner_id.clone(),
            service: self.service.clone(),
            amount: self.amount,
            payment_type: self.payment_type.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stamping_overrides_client_date_and_id() {
        let client: Appointment = serde_json::from_value(json!({
            "id": "ffffffffffffffffffffffff",
            "date": "2001-01-01T00:00:00Z",
            "service": "bath"
        }))
        .unwrap();
        let id = ObjectId::new();
        let now = Utc::now();
        let stamped = client.stamped(id, now);
        assert_eq!(stamped.id, id);
        assert_eq!(stamped.date, now);
        assert_eq!(stamped.service, "bath");
    }

    #[test]
    fn zero_amount_is_missing() {
        let appt = Appointment {
            owner_id: "o".into(),
            pet_id: "p".into(),
            partner_id: "q".into(),
            service: "bath".into(),
            payment_type: "card".into(),
            ..Default::default()
        };
        assert_eq!(appt.validate().unwrap_err().fields(), &["Amount"]);
    }
}
