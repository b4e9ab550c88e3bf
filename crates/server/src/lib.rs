//! HTTP server infrastructure for xray-demo
//!
//! Provides an Axum-based [`HttpServer`] with graceful shutdown, the
//! [`Server`]/[`ServerExt`] lifecycle traits, a `/health` endpoint and the
//! request tracing + metrics layers every router is wrapped in.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{middleware, HttpServer, ServerConfig, ServerExt};
//!
//! let router = middleware::observe(app_router, ServerMetrics::new("http"));
//! HttpServer::new("xray-demo", ServerConfig::default(), router)
//!     .run_with_ctrl_c()
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod middleware;
pub mod shutdown;
pub mod traits;

pub use config::{ServerConfig, DEFAULT_HTTP_PORT};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
