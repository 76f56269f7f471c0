//! Module: cache
//! Responsibility: process-lifetime memo of resolved properties, keyed by
//! closure identity.
//! Does not own: computing resolutions or deciding their validity.
//! Boundary: the resolver's only shared mutable state.

use crate::{identity::ClosureIdentity, property::ResolvedProperty};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

///
/// ResolutionCache
///
/// Sharded concurrent map; no lock is held while a resolution computes.
/// Two threads racing on the same identity may both compute, and the first
/// stored value is what every caller sees from then on.
/// Failures are never stored. Entries are never evicted: the number of
/// distinct accessor references is bounded by source size.
///

#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: DashMap<ClosureIdentity, ResolvedProperty>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored resolution for `identity`, computing and storing
    /// it on the first request.
    pub fn resolve<E, C>(&self, identity: &ClosureIdentity, compute: C) -> Result<ResolvedProperty, E>
    where
        C: FnOnce(&ClosureIdentity) -> Result<ResolvedProperty, E>,
    {
        if let Some(entry) = self.entries.get(identity) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(entry.value().clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed = compute(identity)?;
        let stored = self
            .entries
            .entry(identity.clone())
            .or_insert(computed)
            .value()
            .clone();

        Ok(stored)
    }

    #[must_use]
    pub fn get(&self, identity: &ClosureIdentity) -> Option<ResolvedProperty> {
        self.entries.get(identity).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len() as u64,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

///
/// CacheStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{TypeDescriptor, TypeKind},
        recorder::Proxy,
    };
    use std::{
        sync::{Arc, atomic::AtomicUsize},
        thread,
    };

    #[derive(Default)]
    struct Root;

    impl crate::traits::Recordable for Root {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::new("cache::Root", TypeKind::Entity)
        }

        fn stand_in() -> Option<Self> {
            Some(Self)
        }
    }

    fn get_name(_: &Proxy<Root>) -> u8 {
        0
    }

    fn identity_of<F: Fn(&Proxy<Root>) -> u8 + 'static>(property: F) -> ClosureIdentity {
        ClosureIdentity::extract::<Root, u8, F>(&property).expect("fn item identity")
    }

    fn resolved(path: &str) -> ResolvedProperty {
        ResolvedProperty::new(path, TypeDescriptor::new("u8", TypeKind::Integer))
    }

    #[test]
    fn computes_once_per_identity() {
        let cache = ResolutionCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..10 {
            // a fresh reference to the same fn item on every iteration
            let identity = identity_of(get_name);
            let property = cache
                .resolve(&identity, |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(resolved("name"))
                })
                .unwrap();
            assert_eq!(property.path(), "name");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 9,
                misses: 1,
            }
        );
    }

    #[test]
    fn failures_are_not_stored() {
        let cache = ResolutionCache::new();
        let identity = identity_of(get_name);

        let failed = cache.resolve(&identity, |_| Err::<ResolvedProperty, _>("boom"));
        assert_eq!(failed, Err("boom"));
        assert!(cache.is_empty());

        let recovered = cache.resolve(&identity, |_| Ok::<_, &str>(resolved("name")));
        assert_eq!(recovered.unwrap().path(), "name");
        assert!(cache.get(&identity).is_some());
    }

    #[test]
    fn distinct_closures_get_distinct_entries() {
        let cache = ResolutionCache::new();
        let first = identity_of(|_| 1);
        let second = identity_of(|_| 2);

        cache.resolve(&first, |_| Ok::<_, ()>(resolved("a"))).unwrap();
        cache.resolve(&second, |_| Ok::<_, ()>(resolved("b"))).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&first).unwrap().path(), "a");
        assert_eq!(cache.get(&second).unwrap().path(), "b");
    }

    #[test]
    fn concurrent_resolutions_agree_on_one_value() {
        let cache = Arc::new(ResolutionCache::new());
        let identity = identity_of(get_name);

        let results = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let identity = identity.clone();
                thread::spawn(move || {
                    cache
                        .resolve(&identity, |_| Ok::<_, ()>(resolved("name")))
                        .unwrap()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();

        assert!(results.iter().all(|property| *property == results[0]));
        assert_eq!(cache.len(), 1);
    }
}
