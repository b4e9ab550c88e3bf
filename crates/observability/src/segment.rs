//! Traced segments around outbound calls
//!
//! Every call that leaves the process (object storage, remote HTTP, SQL) is
//! wrapped in its own `segment` span carrying the call name, a namespace,
//! the elapsed time and, on failure, the error text. Timing and outcome are
//! also fed to the segment metrics.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tracing::field::{display, Empty};
use tracing::{debug, info_span, warn, Instrument};

use crate::metrics::record_segment;

/// Namespace of an outbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// AWS SDK call (S3)
    Aws,
    /// Plain outbound HTTP
    Remote,
    /// Relational database statement
    Sql,
}

impl SegmentKind {
    pub fn namespace(&self) -> &'static str {
        match self {
            SegmentKind::Aws => "aws",
            SegmentKind::Remote => "remote",
            SegmentKind::Sql => "sql",
        }
    }
}

/// Run `call` inside a segment span and return its result untouched.
pub async fn traced<F, T, E>(name: &'static str, kind: SegmentKind, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let span = info_span!(
        "segment",
        segment = name,
        namespace = kind.namespace(),
        duration_ms = Empty,
        error = Empty,
    );

    let start = Instant::now();
    let result = call.instrument(span.clone()).await;
    let elapsed = start.elapsed();

    span.record("duration_ms", elapsed.as_millis() as u64);
    match &result {
        Ok(_) => debug!(parent: &span, "Segment completed"),
        Err(e) => {
            span.record("error", display(e));
            warn!(parent: &span, error = %e, "Segment failed");
        }
    }

    record_segment(name, kind, elapsed, result.is_ok());
    result
}
