//! Observability infrastructure for xray-demo
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Traced segments around outbound calls (storage, remote HTTP, SQL)
//! - Prometheus metrics for inbound requests and outbound segments
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//! use observability::segment::{traced, SegmentKind};
//!
//! init_logging("xray-demo", LogFormat::Pretty)?;
//!
//! let body = traced("remote.fetch_index", SegmentKind::Remote, client.fetch_index()).await?;
//! ```

pub mod logging;
pub mod metrics;
pub mod segment;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, ServerMetrics};
pub use segment::{traced, SegmentKind};
