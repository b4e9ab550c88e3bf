//! API routes for the demo service

use axum::{routing::get, Router};

use crate::api::handlers::{echo, index, ApiState};

/// Create the demo router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(echo))
        .route("/api/index", get(index))
        .with_state(state)
}
