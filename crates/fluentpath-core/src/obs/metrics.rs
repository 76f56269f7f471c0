use dashmap::DashMap;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

///
/// ResolverMetrics
/// Ephemeral, in-memory counters for one resolver.
///

#[derive(Debug, Default)]
pub struct ResolverMetrics {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    direct_resolutions: AtomicU64,
    chain_recordings: AtomicU64,
    failures: DashMap<&'static str, u64>,
}

impl ResolverMetrics {
    pub(crate) fn add_cache_hit(&self) {
        bump(&self.cache_hits);
    }

    pub(crate) fn add_cache_miss(&self) {
        bump(&self.cache_misses);
    }

    pub(crate) fn add_direct_resolution(&self) {
        bump(&self.direct_resolutions);
    }

    pub(crate) fn add_chain_recording(&self) {
        bump(&self.chain_recordings);
    }

    pub(crate) fn add_failure(&self, label: &'static str) {
        let mut count = self.failures.entry(label).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Point-in-time copy of every counter.
    #[must_use]
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            direct_resolutions: self.direct_resolutions.load(Ordering::Relaxed),
            chain_recordings: self.chain_recordings.load(Ordering::Relaxed),
            failures: self
                .failures
                .iter()
                .map(|entry| ((*entry.key()).to_string(), *entry.value()))
                .collect(),
        }
    }

    /// Reset all counters (useful in tests).
    pub fn reset(&self) {
        for counter in [
            &self.cache_hits,
            &self.cache_misses,
            &self.direct_resolutions,
            &self.chain_recordings,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.failures.clear();
    }
}

// Saturating, like every counter here.
fn bump(counter: &AtomicU64) {
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |value| {
        Some(value.saturating_add(1))
    });
}

///
/// MetricsReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MetricsReport {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub direct_resolutions: u64,
    pub chain_recordings: u64,
    pub failures: BTreeMap<String, u64>,
}

impl MetricsReport {
    #[must_use]
    pub fn failure_total(&self) -> u64 {
        self.failures
            .values()
            .fold(0, |total, count| total.saturating_add(*count))
    }
}

///
/// TESTS
///
