//! Core runtime for fluentpath: closure identity, the resolution cache, the
//! direct accessor resolver, the chain recorder, and the filter type guard
//! built on top of them.

extern crate self as fluentpath;

// public exports are one module level down
pub mod accessor;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod identity;
pub mod model;
pub mod obs;
pub mod property;
pub mod recorder;
pub mod resolver;
pub mod traits;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use recorder::Proxy;

///
/// Prelude
///
/// Vocabulary a caller needs to declare entities and resolve accessors.
/// No errors, caches, or metrics are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{FieldStep, Predicate},
        model::{TypeDescriptor, TypeKind},
        property::ResolvedProperty,
        recorder::Proxy,
        resolver::PropertyResolver,
        traits::Recordable,
    };
}

/// Support items for `#[derive(Recordable)]` output. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::traits::{StandInProbe, ViaDefault, ViaNone};
}
