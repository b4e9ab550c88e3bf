//! CountMapper trait definition

use async_trait::async_trait;

use crate::error::Result;

/// Typed repository for the count query
///
/// Every unit of work runs inside a session opened by [`CountMapper::begin`];
/// the caller decides whether the session commits or rolls back.
#[async_trait]
pub trait CountMapper: Send + Sync {
    /// Open a transaction-scoped session
    async fn begin(&self) -> Result<Box<dyn MapperSession>>;
}

/// One open transaction on the mapper's store
#[async_trait]
pub trait MapperSession: Send {
    /// Number of rows whose id equals `id`
    async fn count(&mut self, id: i64) -> Result<i64>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}
