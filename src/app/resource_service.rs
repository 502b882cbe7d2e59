//! Create/read/edit/delete/list lifecycle shared by every entity.
//!
//! Each operation issues its store calls through [`ResourceService::bounded`], so a
//! call that exceeds the configured timeout is abandoned and surfaces as
//! [`StoreError::Timeout`]. Nothing is retried.
//!
//! There is no coordination between concurrent edits and deletes of the same id; the
//! last store call to land wins.

use crate::app::error::ServiceError;
use crate::domain::model::{Entity, ObjectId};
use crate::storage::document::{DocumentStore, InsertOneResult, StoreError};
use chrono::Utc;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

pub struct ResourceService<E> {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            timeout: self.timeout,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> ResourceService<E> {
    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self {
            store,
            timeout,
            _entity: PhantomData,
        }
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    fn parse_body(body: &[u8]) -> Result<E, ServiceError> {
        serde_json::from_slice::<E>(body).map_err(|e| ServiceError::MalformedRequest(e.to_string()))
    }

    fn parse_and_validate(body: &[u8]) -> Result<E, ServiceError> {
        let record = Self::parse_body(body)?;
        record.validate()?;
        Ok(record)
    }

    pub async fn create(&self, body: &[u8]) -> Result<InsertOneResult, ServiceError> {
        let record = Self::parse_and_validate(body)?.stamped(ObjectId::new(), Utc::now());
        let id = record.id();
        let doc = serde_json::to_value(&record).map_err(StoreError::from)?;
        let ack = self
            .bounded(self.store.insert_one(E::COLLECTION, id, doc))
            .await?;
        tracing::debug!("inserted {} {}", E::LABEL, ack.inserted_id);
        Ok(ack)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<E, ServiceError> {
        let id = ObjectId::parse_lenient(raw_id);
        self.fetch(id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!(
                "no document with id {} in collection '{}'",
                raw_id,
                E::COLLECTION
            ))
        })
    }

    async fn fetch(&self, id: ObjectId) -> Result<Option<E>, StoreError> {
        match self.bounded(self.store.find_one(E::COLLECTION, id)).await? {
            Some(doc) => Ok(Some(serde_json::from_value::<E>(doc)?)),
            None => Ok(None),
        }
    }

    /// Replaces every mutable field of the record with `raw_id`.
    ///
    /// When no document matches, the result is a default-valued record rather than
    /// `NotFound`, and the response is still a success.
    pub async fn edit_by_id(&self, raw_id: &str, body: &[u8]) -> Result<E, ServiceError> {
        let id = ObjectId::parse_lenient(raw_id);
        let record = Self::parse_and_validate(body)?;
        let changes = serde_json::to_value(record.changes()).map_err(StoreError::from)?;

        let result = self
            .bounded(self.store.update_one(E::COLLECTION, id, changes))
            .await?;
        if result.matched_count != 1 {
            tracing::debug!("edit of {} {} matched nothing", E::LABEL, raw_id);
            return Ok(E::default());
        }

        // Deleted between the update and the read-back.
        self.fetch(id).await?.ok_or_else(|| {
            ServiceError::Persistence(StoreError::Vanished {
                collection: E::COLLECTION.to_string(),
                id,
            })
        })
    }

    pub async fn delete_by_id(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = ObjectId::parse_lenient(raw_id);
        let deleted = self
            .bounded(self.store.delete_one(E::COLLECTION, id))
            .await?;
        if deleted < 1 {
            return Err(ServiceError::NotFound(format!(
                "Error: The {} with the ID {} does not exist.",
                E::LABEL,
                raw_id
            )));
        }
        Ok(())
    }

    /// All records; one undecodable document fails the whole listing.
    pub async fn list_all(&self) -> Result<Vec<E>, ServiceError> {
        let docs = self.bounded(self.store.find_all(E::COLLECTION)).await?;
        let records = docs
            .into_iter()
            .map(serde_json::from_value::<E>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;
        Ok(records)
    }
}
