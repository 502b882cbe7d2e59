pub mod config;
pub mod logging;

use crate::infra::config::{Config, StoreBackend};
use crate::storage::document::{DocumentStore, MemoryDocumentStore, PostgresDocumentStore};
use std::sync::Arc;

/// Builds the document store selected by `STORE_BACKEND`.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let store =
                PostgresDocumentStore::connect(config.database_url()?, config.db_max_connections)
                    .await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryDocumentStore::new())),
    }
}
