//! Module: accessor
//! Responsibility: the accessor naming convention and the direct-reference
//! fast path.
//! Does not own: closure identity parsing or chain recording.
//! Boundary: called by the resolver on a cache miss, before the recorder.

use crate::{
    error::ResolveError, identity::ClosureIdentity, property::ResolvedProperty,
    traits::Recordable,
};

const GETTER_PREFIX: &str = "get_";
const PREDICATE_PREFIX: &str = "is_";

/// Property exposed by an accessor method name: `get_x` and `is_x` both
/// expose `x`. Returns `None` for anything that is not accessor-shaped.
#[must_use]
pub fn property_name(method: &str) -> Option<&str> {
    let property = method
        .strip_prefix(GETTER_PREFIX)
        .or_else(|| method.strip_prefix(PREDICATE_PREFIX))?;

    is_identifier(property).then_some(property)
}

#[must_use]
pub fn is_accessor(method: &str) -> bool {
    property_name(method).is_some()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
}

/// Resolve a bare accessor reference (`Proxy::<Root>::get_x`) from its
/// identity alone.
///
/// `Ok(None)` hands the closure to the chain recorder: it is either not a
/// bare reference, or a getter-shaped method the root's model does not know.
pub(crate) fn resolve_direct<T: Recordable>(
    identity: &ClosureIdentity,
) -> Result<Option<ResolvedProperty>, ResolveError> {
    if !identity.is_direct_reference() {
        return Ok(None);
    }

    let method = identity.method_name();
    let Some(property) = property_name(method) else {
        return Err(ResolveError::invalid_accessor(T::descriptor().name, method));
    };
    let Some(accessor) = T::model().and_then(|model| model.accessor(method)) else {
        return Ok(None);
    };
    debug_assert_eq!(accessor.property, property);

    Ok(Some(ResolvedProperty::new(property, (accessor.returns)())))
}

///
/// TESTS
///
