//! API handlers for the demo HTTP endpoints

use axum::extract::{Query, State};
use std::sync::Arc;
use tracing::instrument;

use crate::api::models::EchoParams;
use crate::error::Result;
use crate::service::OrchestrationService;

/// Bucket identifier handed to the orchestration service
pub const INDEX_BUCKET: &str = "test_bucket";

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<OrchestrationService>,
}

impl ApiState {
    pub fn new(service: OrchestrationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Echo handler; an absent `message` is rendered as `null`
#[instrument(skip_all)]
pub async fn echo(Query(pairs): Query<Vec<(String, String)>>) -> String {
    let params = EchoParams::from_pairs(pairs);
    format!(
        "Your message is: {}",
        params.message.as_deref().unwrap_or("null")
    )
}

/// Orchestration handler
#[instrument(skip_all)]
pub async fn index(State(state): State<ApiState>) -> Result<&'static str> {
    state.service.orchestrate(INDEX_BUCKET).await?;
    Ok("HERE")
}
