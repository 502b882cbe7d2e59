//! In-process document store.
//!
//! Same semantics as the PostgreSQL store: insertion order is the natural iteration
//! order, updates merge top-level keys. Collections are created on first insert.

use super::{
    expect_object, validate_collection, DocumentStore, InsertOneResult, StoreError, UpdateResult,
};
use crate::domain::model::ObjectId;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tokio::sync::RwLock;

type Collection = Vec<(ObjectId, JsonValue)>;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    /// Stores `doc` without any checks. Lets tests plant documents that do not
    /// decode into an entity.
    pub async fn insert_raw(&self, collection: &str, id: ObjectId, doc: JsonValue) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push((id, doc));
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        validate_collection(collection)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn collection_exists(&self, collection: &str) -> Result<bool, StoreError> {
        validate_collection(collection)?;
        Ok(self.collections.read().await.contains_key(collection))
    }

    async fn insert_one(
        &self,
        collection: &str,
        id: ObjectId,
        doc: JsonValue,
    ) -> Result<InsertOneResult, StoreError> {
        validate_collection(collection)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|(existing, _)| *existing == id) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id,
            });
        }
        docs.push((id, doc));
        Ok(InsertOneResult { inserted_id: id })
    }

    async fn find_one(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<JsonValue>, StoreError> {
        validate_collection(collection)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(existing, _)| *existing == id))
            .map(|(_, doc)| doc.clone()))
    }

    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        changes: JsonValue,
    ) -> Result<UpdateResult, StoreError> {
        validate_collection(collection)?;
        let changes = expect_object(changes)?;
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| *existing == id));
        let Some((_, doc)) = target else {
            return Ok(UpdateResult { matched_count: 0 });
        };
        match doc {
            JsonValue::Object(fields) => {
                for (k, v) in changes {
                    fields.insert(k, v);
                }
            }
            other => *other = JsonValue::Object(changes),
        }
        Ok(UpdateResult { matched_count: 1 })
    }

    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<u64, StoreError> {
        validate_collection(collection)?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|(existing, _)| *existing == id) {
            Some(idx) => {
                docs.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        validate_collection(collection)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
