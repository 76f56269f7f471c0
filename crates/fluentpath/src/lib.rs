//! ## Crate layout
//! - `core`: closure identity, resolution cache, direct accessor resolver,
//!   chain recorder, filter type guard, and observability.
//! - `derive`: `#[derive(Recordable)]`, which generates the type model and
//!   the `<Entity>Accessors` trait recorded on `Proxy<Entity>`.
//!
//! Callers reference properties through accessors instead of strings:
//!
//! ```ignore
//! use fluentpath::prelude::*;
//!
//! #[derive(Default, Recordable)]
//! struct Member { name: String, team: Team }
//!
//! let path = fluentpath::resolve_path(|m: &Proxy<Member>| m.get_team().get_name())?;
//! assert_eq!(path, "team.name");
//! ```
//!
//! Chain recording reports malformed closures by unwinding out of them, so
//! binaries must build with `panic = "unwind"` (the default). Under
//! `panic = "abort"` such a closure aborts the process instead of returning
//! a `ResolveError`.

pub use fluentpath_core as core;
pub use fluentpath_derive as derive;

// module surface the derive output addresses as `::fluentpath::*`
pub use fluentpath_core::{
    Proxy, __private, accessor, cache, config, error, filter, identity, model, obs, property,
    recorder, resolver, traits,
};
pub use fluentpath_derive::Recordable;

use fluentpath_core::{
    error::ResolveError, filter::FieldStep, model::TypeDescriptor, property::ResolvedProperty,
    resolver::PropertyResolver, traits::Recordable,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Global resolution
//

/// Resolve `property` with the process-wide resolver.
/// Requires `panic = "unwind"`.
pub fn resolve<T, R, F>(property: F) -> Result<ResolvedProperty, ResolveError>
where
    T: Recordable,
    R: 'static,
    F: Fn(&Proxy<T>) -> R + 'static,
{
    PropertyResolver::global().resolve(property)
}

/// Dot-separated property path of `property`, via the process-wide resolver.
pub fn resolve_path<T, R, F>(property: F) -> Result<String, ResolveError>
where
    T: Recordable,
    R: 'static,
    F: Fn(&Proxy<T>) -> R + 'static,
{
    PropertyResolver::global().resolve_path(property)
}

/// Declared type of the last accessor in `property`, via the process-wide
/// resolver.
pub fn resolve_leaf_type<T, R, F>(property: F) -> Result<TypeDescriptor, ResolveError>
where
    T: Recordable,
    R: 'static,
    F: Fn(&Proxy<T>) -> R + 'static,
{
    PropertyResolver::global().resolve_leaf_type(property)
}

/// Typed filter step over `property`, via the process-wide resolver.
pub fn field<T, R, F>(property: F) -> Result<FieldStep, ResolveError>
where
    T: Recordable,
    R: 'static,
    F: Fn(&Proxy<T>) -> R + 'static,
{
    PropertyResolver::global().field(property)
}

///
/// Prelude
/// Entity vocabulary plus the derive; errors and metrics stay one module
/// level down.
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use fluentpath_derive::Recordable;
}
