//! Metrics sink boundary.
//!
//! Resolver logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through ResolutionEvent and MetricsSink.
use crate::obs::metrics::ResolverMetrics;
use std::sync::Arc;

///
/// ResolutionRoute
/// Which resolver produced a freshly computed property.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionRoute {
    Direct,
    Recorded,
}

///
/// ResolutionEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionEvent {
    CacheHit {
        root: &'static str,
    },
    CacheMiss {
        root: &'static str,
    },
    Resolved {
        root: &'static str,
        route: ResolutionRoute,
        depth: usize,
    },
    Failed {
        root: &'static str,
        label: &'static str,
    },
}

impl ResolutionEvent {
    #[must_use]
    pub const fn root(&self) -> &'static str {
        match self {
            Self::CacheHit { root }
            | Self::CacheMiss { root }
            | Self::Resolved { root, .. }
            | Self::Failed { root, .. } => root,
        }
    }
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: ResolutionEvent);
}

impl MetricsSink for ResolverMetrics {
    fn record(&self, event: ResolutionEvent) {
        match event {
            ResolutionEvent::CacheHit { .. } => self.add_cache_hit(),
            ResolutionEvent::CacheMiss { .. } => self.add_cache_miss(),
            ResolutionEvent::Resolved { route, .. } => match route {
                ResolutionRoute::Direct => self.add_direct_resolution(),
                ResolutionRoute::Recorded => self.add_chain_recording(),
            },
            ResolutionEvent::Failed { label, .. } => self.add_failure(label),
        }
    }
}

/// Deliver one event to the resolver's own counters and every extra sink.
pub(crate) fn record(
    metrics: &ResolverMetrics,
    sinks: &[Arc<dyn MetricsSink>],
    event: ResolutionEvent,
) {
    metrics.record(event);
    for sink in sinks {
        sink.record(event);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSink {
        calls: AtomicUsize,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: ResolutionEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn record_fans_out_to_metrics_and_sinks() {
        let metrics = ResolverMetrics::default();
        let first = Arc::new(CountingSink::default());
        let second = Arc::new(CountingSink::default());
        let sinks: Vec<Arc<dyn MetricsSink>> = vec![first.clone(), second.clone()];

        record(&metrics, &sinks, ResolutionEvent::CacheMiss { root: "app::Member" });
        record(
            &metrics,
            &sinks,
            ResolutionEvent::Resolved {
                root: "app::Member",
                route: ResolutionRoute::Recorded,
                depth: 2,
            },
        );

        assert_eq!(first.calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.calls.load(Ordering::SeqCst), 2);

        let report = metrics.report();
        assert_eq!(report.cache_misses, 1);
        assert_eq!(report.chain_recordings, 1);
        assert_eq!(report.direct_resolutions, 0);
    }

    #[test]
    fn failures_are_counted_by_label() {
        let metrics = ResolverMetrics::default();

        for label in ["empty_chain", "empty_chain", "branching_chain"] {
            metrics.record(ResolutionEvent::Failed {
                root: "app::Member",
                label,
            });
        }

        let report = metrics.report();
        assert_eq!(report.failures.get("empty_chain"), Some(&2));
        assert_eq!(report.failures.get("branching_chain"), Some(&1));
        assert_eq!(report.failure_total(), 3);
    }

    #[test]
    fn every_event_names_its_root() {
        let event = ResolutionEvent::Failed {
            root: "app::Post",
            label: "empty_chain",
        };

        assert_eq!(event.root(), "app::Post");
    }
}
