pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{ResourceService, ServiceError, Services};
pub use domain::model::{Appointment, Entity, ObjectId, Owner, Partner, Pet};
pub use infra::config::Config;
pub use storage::document::{DocumentStore, MemoryDocumentStore, PostgresDocumentStore, StoreError};
