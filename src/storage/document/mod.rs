//! Document store contract used by the lifecycle service.
//!
//! A store holds one collection per entity. Documents are JSON objects addressed by
//! their [`ObjectId`]; updates merge the given top-level keys into the stored document.

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

use crate::domain::model::ObjectId;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to decode document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("context deadline exceeded: store call took longer than {0:?}")]
    Timeout(Duration),
    #[error("invalid collection name '{0}'")]
    InvalidCollection(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("duplicate id {id} in collection '{collection}'")]
    DuplicateId { collection: String, id: ObjectId },
    #[error("document {id} in collection '{collection}' was removed before it could be read back")]
    Vanished { collection: String, id: ObjectId },
}

/// Acknowledgement returned on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct InsertOneResult {
    #[serde(rename = "InsertedID")]
    #[schema(value_type = String)]
    pub inserted_id: ObjectId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
}

/// Narrow persistence contract. Implementations must be safe for concurrent use.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates the collection if it does not exist yet.
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError>;

    async fn collection_exists(&self, collection: &str) -> Result<bool, StoreError>;

    async fn insert_one(
        &self,
        collection: &str,
        id: ObjectId,
        doc: JsonValue,
    ) -> Result<InsertOneResult, StoreError>;

    async fn find_one(&self, collection: &str, id: ObjectId)
        -> Result<Option<JsonValue>, StoreError>;

    /// Merges the top-level keys of `changes` into the document with `id`.
    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        changes: JsonValue,
    ) -> Result<UpdateResult, StoreError>;

    /// Returns the number of removed documents (0 or 1).
    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<u64, StoreError>;

    /// Every document of the collection in the store's natural order.
    async fn find_all(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub fn validate_collection(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

pub(crate) fn expect_object(changes: JsonValue) -> Result<serde_json::Map<String, JsonValue>, StoreError> {
    match changes {
        JsonValue::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "update document must be an object, got {}",
            other
        ))),
    }
}
