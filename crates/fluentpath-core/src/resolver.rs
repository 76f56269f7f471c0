//! Module: resolver
//! Responsibility: the public resolution service tying identity, cache,
//! direct resolution and chain recording together.
//! Does not own: any resolution algorithm itself.
//! Boundary: the only entry point callers use.

use crate::{
    accessor,
    cache::{CacheStats, ResolutionCache},
    config::ResolverConfig,
    error::{GlobalResolverError, ResolveError},
    filter::FieldStep,
    identity::ClosureIdentity,
    model::TypeDescriptor,
    obs::{
        MetricsReport, MetricsSink, ResolutionEvent, ResolutionRoute, ResolverMetrics, sink,
    },
    property::ResolvedProperty,
    recorder::{self, Proxy},
    traits::Recordable,
};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};
use tracing::debug;

static GLOBAL: OnceLock<PropertyResolver> = OnceLock::new();

///
/// PropertyResolver
///
/// Resolves accessor references to property paths and memoizes the result
/// per closure identity for the lifetime of the resolver. Closures that
/// capture state are recorded on every call and never cached.
///
/// Chain recording reports failures by unwinding out of the caller's
/// closure, so binaries using this crate must keep `panic = "unwind"`.
/// Under `panic = "abort"` a malformed accessor chain aborts the process
/// instead of returning a `ResolveError`.
///
/// Flow: identity extraction → cache lookup → on miss, the direct accessor
/// resolver, else the chain recorder → store → return.
///

pub struct PropertyResolver {
    config: ResolverConfig,
    cache: ResolutionCache,
    metrics: ResolverMetrics,
    sinks: Vec<Arc<dyn MetricsSink>>,
}

impl PropertyResolver {
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            cache: ResolutionCache::new(),
            metrics: ResolverMetrics::default(),
            sinks: Vec::new(),
        }
    }

    /// Forward every resolution event to `sink` as well.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Process-wide resolver, created with the default config on first use
    /// unless `install_global` ran earlier.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::new(ResolverConfig::default()))
    }

    /// Create the process-wide resolver with `config`. Fails if it already
    /// exists, whether installed or created lazily by `global`.
    pub fn install_global(config: ResolverConfig) -> Result<&'static Self, GlobalResolverError> {
        let mut installed = false;
        let resolver = GLOBAL.get_or_init(|| {
            installed = true;
            Self::new(config)
        });

        if installed {
            debug!(
                max_chain_depth = resolver.config.max_chain_depth,
                "installed global property resolver"
            );
            Ok(resolver)
        } else {
            Err(GlobalResolverError::AlreadyInstalled)
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    #[must_use]
    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    /// Resolve `property` to its path and leaf type.
    ///
    /// Requires `panic = "unwind"`; see the type docs.
    pub fn resolve<T, R, F>(&self, property: F) -> Result<ResolvedProperty, ResolveError>
    where
        T: Recordable,
        R: 'static,
        F: Fn(&Proxy<T>) -> R + 'static,
    {
        let root = T::descriptor().name;
        let result = ClosureIdentity::extract::<T, R, F>(&property)
            .and_then(|identity| self.resolve_identity::<T, R, F>(&identity, &property, root));

        if let Err(error) = &result {
            self.emit(ResolutionEvent::Failed {
                root,
                label: error.label(),
            });
        }

        result
    }

    /// Dot-separated property path of `property`.
    pub fn resolve_path<T, R, F>(&self, property: F) -> Result<String, ResolveError>
    where
        T: Recordable,
        R: 'static,
        F: Fn(&Proxy<T>) -> R + 'static,
    {
        self.resolve(property).map(|resolved| resolved.path().to_string())
    }

    /// Declared type of the final accessor in `property`.
    pub fn resolve_leaf_type<T, R, F>(&self, property: F) -> Result<TypeDescriptor, ResolveError>
    where
        T: Recordable,
        R: 'static,
        F: Fn(&Proxy<T>) -> R + 'static,
    {
        self.resolve(property).map(|resolved| resolved.leaf_type())
    }

    /// Typed filter step over the property `property` resolves to.
    pub fn field<T, R, F>(&self, property: F) -> Result<FieldStep, ResolveError>
    where
        T: Recordable,
        R: 'static,
        F: Fn(&Proxy<T>) -> R + 'static,
    {
        self.resolve(property).map(|resolved| FieldStep::typed(&resolved))
    }

    fn resolve_identity<T, R, F>(
        &self,
        identity: &ClosureIdentity,
        property: &F,
        root: &'static str,
    ) -> Result<ResolvedProperty, ResolveError>
    where
        T: Recordable,
        R: 'static,
        F: Fn(&Proxy<T>) -> R + 'static,
    {
        // captured state can steer the chain, so one recording does not
        // speak for every value the closure type is built with
        if size_of::<F>() != 0 {
            return self.compute::<T, R, F>(identity, property, root);
        }

        let mut computed = false;
        let resolved = self.cache.resolve(identity, |identity| {
            computed = true;
            self.compute::<T, R, F>(identity, property, root)
        })?;

        if !computed {
            self.emit(ResolutionEvent::CacheHit { root });
        }

        Ok(resolved)
    }

    fn compute<T, R, F>(
        &self,
        identity: &ClosureIdentity,
        property: &F,
        root: &'static str,
    ) -> Result<ResolvedProperty, ResolveError>
    where
        T: Recordable,
        R: 'static,
        F: Fn(&Proxy<T>) -> R + 'static,
    {
        self.emit(ResolutionEvent::CacheMiss { root });

        let (resolved, route) = match accessor::resolve_direct::<T>(identity)? {
            Some(resolved) => (resolved, ResolutionRoute::Direct),
            None => (
                recorder::record::<T, R, F>(identity, property, self.config.max_chain_depth)?,
                ResolutionRoute::Recorded,
            ),
        };

        debug!(
            closure = %identity.describe(),
            path = resolved.path(),
            leaf = resolved.leaf_type().name,
            ?route,
            "resolved property"
        );
        self.emit(ResolutionEvent::Resolved {
            root,
            route,
            depth: resolved.depth(),
        });

        Ok(resolved)
    }

    fn emit(&self, event: ResolutionEvent) {
        if self.config.record_metrics {
            sink::record(&self.metrics, &self.sinks, event);
        }
    }
}

impl Default for PropertyResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl fmt::Debug for PropertyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyResolver")
            .field("config", &self.config)
            .field("cache", &self.cache.stats())
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
