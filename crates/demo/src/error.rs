//! Demo service error types

use thiserror::Error;

/// Faults raised by the orchestration collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    /// Object storage (S3) call failed
    #[error("Object storage error: {0}")]
    Storage(String),

    /// Outbound HTTP call failed or returned a non-success status
    #[error("Remote call failed: {0}")]
    Remote(String),

    /// Database error, including transaction begin/commit
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A collaborator could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DemoError {
    /// Stable machine-readable code used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            DemoError::Storage(_) => "STORAGE_ERROR",
            DemoError::Remote(_) => "REMOTE_CALL_ERROR",
            DemoError::Persistence(_) => "PERSISTENCE_ERROR",
            DemoError::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
