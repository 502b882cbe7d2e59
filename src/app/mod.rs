pub mod error;
pub mod resource_service;

pub use error::ServiceError;
pub use resource_service::ResourceService;

use crate::domain::model::{Appointment, Owner, Partner, Pet, COLLECTIONS};
use crate::storage::document::{DocumentStore, StoreError};
use std::sync::Arc;
use std::time::Duration;

/// One lifecycle service per entity, all sharing the same store.
#[derive(Clone)]
pub struct Services {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
    pub owners: ResourceService<Owner>,
    pub partners: ResourceService<Partner>,
    pub pets: ResourceService<Pet>,
    pub appointments: ResourceService<Appointment>,
}

impl Services {
    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self {
            owners: ResourceService::new(store.clone(), timeout),
            partners: ResourceService::new(store.clone(), timeout),
            pets: ResourceService::new(store.clone(), timeout),
            appointments: ResourceService::new(store.clone(), timeout),
            store,
            timeout,
        }
    }

    /// Store reachability, bounded like every other store call.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match tokio::time::timeout(self.timeout, self.store.ping()).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    pub async fn ensure_collections(&self) -> Result<(), StoreError> {
        for collection in COLLECTIONS {
            self.store.ensure_collection(collection).await?;
        }
        Ok(())
    }
}
