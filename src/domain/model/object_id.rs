//! Store-assigned document identifiers.
//!
//! An id is 12 bytes: 4 bytes of big-endian unix seconds, 5 random bytes chosen once
//! per process, and a 3-byte big-endian counter seeded randomly. On the wire it is a
//! 24-character lowercase hex string.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ObjectIdError {
    #[error("the provided hex string is not a valid ObjectID: expected 24 hex characters, got {0}")]
    InvalidLength(usize),
    #[error("the provided hex string is not a valid ObjectID: {0}")]
    InvalidHex(String),
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// The all-zero id. Never produced by [`ObjectId::new`].
    pub const NIL: ObjectId = ObjectId([0u8; 12]);

    pub fn new() -> Self {
        let secs = chrono::Utc::now().timestamp() as u32;
        let unique = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().gen::<[u8; 5]>());
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen::<u32>() & COUNTER_MASK))
            .fetch_add(1, Ordering::SeqCst)
            & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(unique);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() != 24 {
            return Err(ObjectIdError::InvalidLength(s.len()));
        }
        let bytes = hex::decode(s).map_err(|e| ObjectIdError::InvalidHex(e.to_string()))?;
        let mut out = [0u8; 12];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Parses a path id, mapping malformed input to [`ObjectId::NIL`].
    ///
    /// The nil id is never assigned, so a malformed id behaves exactly like an id
    /// that matches no document.
    pub fn parse_lenient(s: &str) -> Self {
        match Self::parse_str(s) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!("treating malformed id {:?} as nil: {}", s, e);
                Self::NIL
            }
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(serde::de::Error::custom)
    }
}
