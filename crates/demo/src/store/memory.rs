//! In-memory count mapper implementation

use async_trait::async_trait;

use crate::error::{DemoError, Result};
use crate::journal::CallJournal;
use crate::store::traits::{CountMapper, MapperSession};

/// In-memory mapper for testing and development
///
/// Holds a fixed list of row ids; `count` returns how many equal the
/// requested id.
#[derive(Clone, Default)]
pub struct InMemoryCountMapper {
    ids: Vec<i64>,
    fail_begin: Option<String>,
    fail_count: Option<String>,
    fail_commit: Option<String>,
    journal: CallJournal,
}

impl InMemoryCountMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.ids = ids.into_iter().collect();
        self
    }

    pub fn failing_begin(mut self, message: impl Into<String>) -> Self {
        self.fail_begin = Some(message.into());
        self
    }

    pub fn failing_count(mut self, message: impl Into<String>) -> Self {
        self.fail_count = Some(message.into());
        self
    }

    pub fn failing_commit(mut self, message: impl Into<String>) -> Self {
        self.fail_commit = Some(message.into());
        self
    }

    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = journal;
        self
    }
}

#[async_trait]
impl CountMapper for InMemoryCountMapper {
    async fn begin(&self) -> Result<Box<dyn MapperSession>> {
        self.journal.record("mapper.begin");
        if let Some(message) = &self.fail_begin {
            return Err(DemoError::Persistence(message.clone()));
        }
        Ok(Box::new(InMemorySession {
            mapper: self.clone(),
        }))
    }
}

struct InMemorySession {
    mapper: InMemoryCountMapper,
}

#[async_trait]
impl MapperSession for InMemorySession {
    async fn count(&mut self, id: i64) -> Result<i64> {
        self.mapper.journal.record(format!("mapper.count({})", id));
        if let Some(message) = &self.mapper.fail_count {
            return Err(DemoError::Persistence(message.clone()));
        }
        Ok(self.mapper.ids.iter().filter(|row| **row == id).count() as i64)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.mapper.journal.record("mapper.commit");
        match &self.mapper.fail_commit {
            Some(message) => Err(DemoError::Persistence(message.clone())),
            None => Ok(()),
        }
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.mapper.journal.record("mapper.rollback");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_count_matching_ids() {
        let mapper = InMemoryCountMapper::new().with_ids([1, 2, 1, 3]);
        let mut session = mapper.begin().await.unwrap();

        assert_eq!(session.count(1).await.unwrap(), 2);
        assert_eq!(session.count(4).await.unwrap(), 0);
        session.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_journal_records_session_lifecycle() {
        let journal = CallJournal::new();
        let mapper = InMemoryCountMapper::new().with_journal(journal.clone());

        let mut session = mapper.begin().await.unwrap();
        session.count(1).await.unwrap();
        session.rollback().await.unwrap();

        assert_eq!(
            journal.calls(),
            vec!["mapper.begin", "mapper.count(1)", "mapper.rollback"]
        );
    }

    #[tokio::test]
    async fn test_configured_failures() {
        let mapper = InMemoryCountMapper::new().failing_begin("pool exhausted");
        assert_matches!(mapper.begin().await.err(), Some(DemoError::Persistence(_)));

        let mapper = InMemoryCountMapper::new().failing_count("relation does not exist");
        let mut session = mapper.begin().await.unwrap();
        assert_matches!(
            session.count(1).await,
            Err(DemoError::Persistence(m)) if m == "relation does not exist"
        );

        let mapper = InMemoryCountMapper::new().failing_commit("serialization failure");
        let session = mapper.begin().await.unwrap();
        assert_matches!(session.commit().await, Err(DemoError::Persistence(_)));
    }
}
