//! Remote HTTP client - trait and implementations

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::{DemoError, Result};
use crate::journal::CallJournal;

/// Typed client for the one outbound HTTP call the service makes
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// `GET /` on the remote host, returning the body text
    async fn fetch_index(&self) -> Result<String>;
}

/// reqwest-backed remote client
#[derive(Debug, Clone)]
pub struct HttpRemoteClient {
    client: reqwest::Client,
    index_url: String,
}

impl HttpRemoteClient {
    /// Build a client for `base_url`. A `None` timeout keeps reqwest's default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DemoError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            index_url: format!("{}/", base_url.trim_end_matches('/')),
        })
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn fetch_index(&self) -> Result<String> {
        debug!(url = %self.index_url, "Calling remote index");

        let response = self
            .client
            .get(&self.index_url)
            .send()
            .await
            .map_err(|e| DemoError::Remote(e.to_string()))?
            .error_for_status()
            .map_err(|e| DemoError::Remote(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| DemoError::Remote(e.to_string()))
    }
}

// ==================== Mock Implementation ====================

/// Mock remote client for testing
#[derive(Clone)]
pub struct MockRemoteClient {
    body: String,
    fail_with: Option<String>,
    journal: CallJournal,
}

impl Default for MockRemoteClient {
    fn default() -> Self {
        Self {
            body: "<html></html>".to_string(),
            fail_with: None,
            journal: CallJournal::new(),
        }
    }
}

impl MockRemoteClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Make every call fail with the given message
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = journal;
        self
    }
}

#[async_trait]
impl RemoteClient for MockRemoteClient {
    async fn fetch_index(&self) -> Result<String> {
        self.journal.record("remote.fetch_index");
        match &self.fail_with {
            Some(message) => Err(DemoError::Remote(message.clone())),
            None => Ok(self.body.clone()),
        }
    }
}
