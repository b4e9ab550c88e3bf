//! Object storage client - trait and implementations
//!
//! A [`StorageConnector`] builds a fresh [`ObjectStorage`] client for every
//! orchestration call; nothing is pooled or reused between calls.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as AwsS3Client;
use tracing::debug;

use crate::error::{DemoError, Result};
use crate::journal::CallJournal;

/// Client for one object-storage account
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Names of every bucket visible to the configured credentials
    async fn list_buckets(&self) -> Result<Vec<String>>;
}

/// Builds configured [`ObjectStorage`] clients
#[async_trait]
pub trait StorageConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn ObjectStorage>>;
}

/// Credential profile, region and optional endpoint override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub profile: String,
    pub region: String,
    pub endpoint: Option<String>,
}

impl From<&config::StorageConfig> for StorageSettings {
    fn from(storage: &config::StorageConfig) -> Self {
        Self {
            profile: storage.profile.clone(),
            region: storage.region.clone(),
            endpoint: storage.endpoint.clone(),
        }
    }
}

// ==================== Mock Implementation ====================

/// Mock connector for testing
#[derive(Clone, Default)]
pub struct MockStorageConnector {
    buckets: Vec<String>,
    fail_connect: Option<String>,
    fail_list: Option<String>,
    journal: CallJournal,
}

impl MockStorageConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets returned by `list_buckets`
    pub fn with_buckets<I, S>(mut self, buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buckets = buckets.into_iter().map(Into::into).collect();
        self
    }

    /// Make `connect` fail with the given message
    pub fn failing_connect(mut self, message: impl Into<String>) -> Self {
        self.fail_connect = Some(message.into());
        self
    }

    /// Make `list_buckets` fail with the given message
    pub fn failing_list(mut self, message: impl Into<String>) -> Self {
        self.fail_list = Some(message.into());
        self
    }

    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = journal;
        self
    }
}

#[async_trait]
impl StorageConnector for MockStorageConnector {
    async fn connect(&self) -> Result<Box<dyn ObjectStorage>> {
        self.journal.record("storage.connect");
        if let Some(message) = &self.fail_connect {
            return Err(DemoError::Storage(message.clone()));
        }
        Ok(Box::new(MockObjectStorage {
            buckets: self.buckets.clone(),
            fail_list: self.fail_list.clone(),
            journal: self.journal.clone(),
        }))
    }
}

struct MockObjectStorage {
    buckets: Vec<String>,
    fail_list: Option<String>,
    journal: CallJournal,
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        self.journal.record("storage.list_buckets");
        match &self.fail_list {
            Some(message) => Err(DemoError::Storage(message.clone())),
            None => Ok(self.buckets.clone()),
        }
    }
}

// ==================== S3 Implementation ====================

/// Connector producing S3 clients for a named profile and region
#[derive(Debug, Clone)]
pub struct S3StorageConnector {
    settings: StorageSettings,
}

impl S3StorageConnector {
    pub fn new(settings: StorageSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }
}

#[async_trait]
impl StorageConnector for S3StorageConnector {
    async fn connect(&self) -> Result<Box<dyn ObjectStorage>> {
        debug!(
            profile = %self.settings.profile,
            region = %self.settings.region,
            "Building S3 client"
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(self.settings.profile.clone())
            .region(Region::new(self.settings.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &self.settings.endpoint {
            // S3-compatible stores generally need path-style addressing
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Box::new(S3ObjectStorage {
            client: AwsS3Client::from_conf(builder.build()),
        }))
    }
}

struct S3ObjectStorage {
    client: AwsS3Client,
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| DemoError::Storage(DisplayErrorContext(&e).to_string()))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_string))
            .collect())
    }
}
