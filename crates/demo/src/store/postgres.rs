//! PostgreSQL count mapper implementation

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::time::Duration;
use tracing::debug;

use crate::error::{DemoError, Result};
use crate::store::traits::{CountMapper, MapperSession};

/// PostgreSQL count mapper
pub struct PostgresCountMapper {
    pool: PgPool,
    statement: String,
}

impl PostgresCountMapper {
    /// Build a mapper over a lazily-connecting pool.
    ///
    /// No connection is opened until the first session begins.
    pub fn connect_lazy(url: &str, max_connections: u32, table: &str) -> Result<Self> {
        let statement = count_statement(table)?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(url)
            .map_err(|e| DemoError::Config(format!("Invalid database url: {}", e)))?;

        Ok(Self { pool, statement })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool, table: &str) -> Result<Self> {
        Ok(Self {
            pool,
            statement: count_statement(table)?,
        })
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }
}

/// Count query against `table`, which must be a bare identifier.
pub fn count_statement(table: &str) -> Result<String> {
    if !config::is_table_identifier(table) {
        return Err(DemoError::Config(format!(
            "'{}' is not a valid table identifier",
            table
        )));
    }
    Ok(format!("SELECT COUNT(id) FROM {} WHERE id = $1", table))
}

fn persistence(e: sqlx::Error) -> DemoError {
    DemoError::Persistence(e.to_string())
}

#[async_trait]
impl CountMapper for PostgresCountMapper {
    async fn begin(&self) -> Result<Box<dyn MapperSession>> {
        let tx = self.pool.begin().await.map_err(persistence)?;
        debug!("Transaction started");

        Ok(Box::new(PostgresSession {
            tx,
            statement: self.statement.clone(),
        }))
    }
}

struct PostgresSession {
    tx: Transaction<'static, Postgres>,
    statement: String,
}

#[async_trait]
impl MapperSession for PostgresSession {
    async fn count(&mut self, id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(&self.statement)
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(persistence)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(persistence)?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(persistence)?;
        debug!("Transaction rolled back");
        Ok(())
    }
}
