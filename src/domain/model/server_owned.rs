//! Field deserializers for values the server assigns itself.
//!
//! Whatever a client sends for these fields is overwritten on create and left out of
//! edits, so malformed input decodes to the zero value instead of failing the body.
//! Well-formed values still decode, which keeps stored documents readable.

use super::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

pub fn object_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObjectId, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => ObjectId::parse_lenient(&s),
        _ => ObjectId::NIL,
    })
}

pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default(),
        _ => DateTime::<Utc>::default(),
    })
}
