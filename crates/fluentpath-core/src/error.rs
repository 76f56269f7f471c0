use std::fmt;
use thiserror::Error as ThisError;

///
/// ResolveError
///
/// Failure to turn an accessor reference into a property path.
/// Every variant is a programming error at the call site: deterministic,
/// never retried, never cached.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResolveError {
    #[error("unable to extract property information from `{signature}`: {reason}")]
    UnsupportedClosureKind {
        signature: String,
        reason: &'static str,
    },

    #[error(
        "property references must point to an accessor (`get_*` / `is_*`) but got `{method}` on `{declaring_type}`"
    )]
    InvalidAccessorReference {
        declaring_type: String,
        method: String,
    },

    #[error(
        "property chaining only supports accessor calls but got {call} (closure={closure}, path={path})"
    )]
    NonAccessorCallDetected {
        closure: String,
        call: String,
        path: String,
    },

    #[error("{issue}: `{type_name}` (closure={closure}, path={path})")]
    UnsupportedIntermediateType {
        closure: String,
        type_name: String,
        issue: IntermediateTypeIssue,
        path: String,
    },

    #[error("property references must invoke at least one accessor (closure={closure}, root={root})")]
    EmptyChainDetected { closure: String, root: String },

    #[error("property chain branched: {detail} (closure={closure}, path={path})")]
    BranchingChainDetected {
        closure: String,
        detail: String,
        path: String,
    },

    #[error(
        "property chain exceeded the maximum depth of {max_depth} accessors (closure={closure}, path={path})"
    )]
    ChainDepthExceeded {
        closure: String,
        max_depth: usize,
        path: String,
    },
}

impl ResolveError {
    /// Stable variant name, used as the metrics label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UnsupportedClosureKind { .. } => "unsupported_closure_kind",
            Self::InvalidAccessorReference { .. } => "invalid_accessor_reference",
            Self::NonAccessorCallDetected { .. } => "non_accessor_call",
            Self::UnsupportedIntermediateType { .. } => "unsupported_intermediate_type",
            Self::EmptyChainDetected { .. } => "empty_chain",
            Self::BranchingChainDetected { .. } => "branching_chain",
            Self::ChainDepthExceeded { .. } => "chain_depth_exceeded",
        }
    }

    pub(crate) fn unsupported_closure(signature: &str, reason: &'static str) -> Self {
        Self::UnsupportedClosureKind {
            signature: signature.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_accessor(declaring_type: &str, method: &str) -> Self {
        Self::InvalidAccessorReference {
            declaring_type: declaring_type.to_string(),
            method: method.to_string(),
        }
    }
}

///
/// IntermediateTypeIssue
/// Why the recorder cannot navigate through a declared type.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IntermediateTypeIssue {
    Interface,
    Sealed,
    Leaf,
    NoConstructor,
    NotAnEntity,
}

impl fmt::Display for IntermediateTypeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Interface => "property chaining does not support interface return types",
            Self::Sealed => "property chaining requires non-sealed types",
            Self::Leaf => "property chaining cannot continue past a leaf type",
            Self::NoConstructor => {
                "property chaining requires a no-argument constructor (`Default`)"
            }
            Self::NotAnEntity => "property chains must start at a recordable entity",
        };

        f.write_str(text)
    }
}

///
/// GlobalResolverError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum GlobalResolverError {
    #[error("the global property resolver is already initialized")]
    AlreadyInstalled,
}
