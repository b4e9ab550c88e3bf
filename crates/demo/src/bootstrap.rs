//! Service assembly
//!
//! Builds every collaborator from [`AppConfig`] and wires them into the
//! orchestration service and HTTP router.

use anyhow::Context;
use axum::Router;
use config::{require_application_name, AppConfig};
use observability::ServerMetrics;
use server::{health_routes, middleware, HealthState};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::api::{create_router, ApiState};
use crate::clients::remote::HttpRemoteClient;
use crate::clients::storage::{S3StorageConnector, StorageSettings};
use crate::service::OrchestrationService;
use crate::store::postgres::PostgresCountMapper;

/// A fully wired service, ready to be served
pub struct Assembly {
    pub application_name: String,
    pub service: OrchestrationService,
}

impl Assembly {
    pub fn into_router(self) -> Router {
        build_router(&self.application_name, self.service)
    }
}

/// Build the real S3, HTTP and Postgres collaborators.
///
/// Fails fast when the application name is missing. The database pool is
/// lazy, so no connection is attempted here. Must run inside a Tokio
/// runtime.
pub fn assemble(config: &AppConfig) -> anyhow::Result<Assembly> {
    let application_name = require_application_name(config)?.to_string();

    let storage = S3StorageConnector::new(StorageSettings::from(&config.storage()));

    let remote_config = config.remote();
    let remote = HttpRemoteClient::new(
        &remote_config.base_url,
        remote_config.timeout_seconds.map(Duration::from_secs),
    )
    .context("Failed to build remote HTTP client")?;

    let mapper = PostgresCountMapper::connect_lazy(
        &config.database.url,
        config.database.max_connections,
        &config.database.count_table,
    )
    .context("Failed to create database pool")?;

    info!(
        application = %application_name,
        remote = %remote.index_url(),
        count_table = %config.database.count_table,
        "Service assembled"
    );

    let service = OrchestrationService::new(Arc::new(storage), Arc::new(remote), Arc::new(mapper));

    Ok(Assembly {
        application_name,
        service,
    })
}

/// Health, echo and orchestration routes behind the request layers
pub fn build_router(application_name: &str, service: OrchestrationService) -> Router {
    let health = Arc::new(HealthState::new(application_name));

    let router = Router::new()
        .merge(health_routes(health))
        .merge(create_router(ApiState::new(service)));

    middleware::observe(router, ServerMetrics::new("http"))
}
