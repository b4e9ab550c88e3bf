//! Echo and traced orchestration endpoints
//!
//! `GET /` echoes a query parameter. `GET /api/index` runs the
//! orchestration step: list object-storage buckets, call a remote HTTP
//! site, run a count query, all inside one database transaction and each
//! wrapped in a traced segment.
//!
//! Collaborators sit behind traits so the service can be assembled with
//! real clients ([`bootstrap::assemble`]) or with the mocks that live next
//! to each trait.

pub mod api;
pub mod bootstrap;
pub mod clients;
pub mod error;
pub mod journal;
pub mod service;
pub mod store;

pub use error::{DemoError, Result};
pub use journal::CallJournal;
pub use service::OrchestrationService;

pub use clients::remote::{HttpRemoteClient, MockRemoteClient, RemoteClient};
pub use clients::storage::{
    MockStorageConnector, ObjectStorage, S3StorageConnector, StorageConnector, StorageSettings,
};
pub use store::memory::InMemoryCountMapper;
pub use store::postgres::PostgresCountMapper;
pub use store::traits::{CountMapper, MapperSession};
