//! Observability: resolution telemetry (metrics) and sink abstractions.
//!
//! Resolution logic never touches counters directly; everything flows
//! through `ResolutionEvent` and `MetricsSink`. Human-readable diagnostics go
//! through `tracing` at the call sites.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{MetricsReport, ResolverMetrics};
pub use sink::{MetricsSink, ResolutionEvent, ResolutionRoute};
