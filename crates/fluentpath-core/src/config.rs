use serde::Deserialize;

/// Default upper bound on accessor calls in one recorded chain.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 32;

///
/// ResolverConfig
///
/// Runtime knobs for a `PropertyResolver`. Deserializable so a host can embed
/// it in its own configuration file; missing keys fall back to defaults.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Recording fails with `ChainDepthExceeded` past this many accessors.
    pub max_chain_depth: usize,

    /// Feed resolution events to the resolver's metrics and sinks.
    pub record_metrics: bool,
}

impl ResolverConfig {
    #[must_use]
    pub const fn with_max_chain_depth(mut self, max_chain_depth: usize) -> Self {
        self.max_chain_depth = max_chain_depth;
        self
    }

    #[must_use]
    pub const fn with_metrics(mut self, record_metrics: bool) -> Self {
        self.record_metrics = record_metrics;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            record_metrics: true,
        }
    }
}

///
/// TESTS
///
