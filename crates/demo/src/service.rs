//! Orchestration service
//!
//! Sequences the three outbound calls inside one mapper transaction. The
//! first fault stops the sequence, rolls the transaction back and is
//! returned to the caller unchanged.

use observability::{traced, SegmentKind};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::clients::remote::RemoteClient;
use crate::clients::storage::StorageConnector;
use crate::error::Result;
use crate::store::traits::{CountMapper, MapperSession};

/// Row id passed to the count query
pub const COUNT_ID: i64 = 1;

pub struct OrchestrationService {
    storage: Arc<dyn StorageConnector>,
    remote: Arc<dyn RemoteClient>,
    mapper: Arc<dyn CountMapper>,
}

impl OrchestrationService {
    pub fn new(
        storage: Arc<dyn StorageConnector>,
        remote: Arc<dyn RemoteClient>,
        mapper: Arc<dyn CountMapper>,
    ) -> Self {
        Self {
            storage,
            remote,
            mapper,
        }
    }

    /// Run the storage, remote and count calls in order.
    ///
    /// `bucket` is only recorded on the span; no collaborator receives it.
    #[instrument(skip(self))]
    pub async fn orchestrate(&self, bucket: &str) -> Result<()> {
        let mut session = traced("db.begin", SegmentKind::Sql, self.mapper.begin()).await?;

        let outcome = self.run_calls(session.as_mut()).await;
        match outcome {
            Ok(()) => {
                traced("db.commit", SegmentKind::Sql, session.commit()).await?;
                debug!("Serviced");
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = session.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn run_calls(&self, session: &mut dyn MapperSession) -> Result<()> {
        let storage = traced("s3.client", SegmentKind::Aws, self.storage.connect()).await?;
        traced("s3.list_buckets", SegmentKind::Aws, storage.list_buckets()).await?;

        traced("remote.index", SegmentKind::Remote, self.remote.fetch_index()).await?;

        traced("mapper.count", SegmentKind::Sql, session.count(COUNT_ID)).await?;
        Ok(())
    }
}
