//! Module: identity
//! Responsibility: structural fingerprint of an accessor-reference closure.
//! Does not own: deciding how the closure is resolved.
//! Boundary: consumed by the resolution cache (key) and the resolvers.
//!
//! Closures and fn items each have a unique, nameable type, so the type
//! itself is the identity. `type_name` exposes the target path; `TypeId`
//! disambiguates closures that print the same name.

use crate::{error::ResolveError, recorder::Proxy, traits::Recordable};
use std::any::{TypeId, type_name};

const CLOSURE_MARKER: &str = "{{closure}}";

///
/// ClosureIdentity
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ClosureIdentity {
    type_id: TypeId,
    declaring_type: &'static str,
    method_name: &'static str,
    method_signature: &'static str,
    parameter_type: &'static str,
    return_type: &'static str,
}

impl ClosureIdentity {
    /// Extract the identity of `property` without invoking it.
    pub fn extract<T, R, F>(_property: &F) -> Result<Self, ResolveError>
    where
        T: Recordable,
        R: 'static,
        F: Fn(&Proxy<T>) -> R + 'static,
    {
        Self::from_type::<F>(type_name::<Proxy<T>>(), type_name::<R>())
    }

    fn from_type<F: 'static>(
        parameter_type: &'static str,
        return_type: &'static str,
    ) -> Result<Self, ResolveError> {
        let method_signature = type_name::<F>();
        let target = parse_target(method_signature)
            .map_err(|reason| ResolveError::unsupported_closure(method_signature, reason))?;

        Ok(Self {
            type_id: TypeId::of::<F>(),
            declaring_type: target.declaring_type,
            method_name: target.method_name,
            method_signature,
            parameter_type,
            return_type,
        })
    }

    #[must_use]
    pub const fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    #[must_use]
    pub const fn method_name(&self) -> &'static str {
        self.method_name
    }

    #[must_use]
    pub const fn method_signature(&self) -> &'static str {
        self.method_signature
    }

    #[must_use]
    pub const fn parameter_type(&self) -> &'static str {
        self.parameter_type
    }

    #[must_use]
    pub const fn return_type(&self) -> &'static str {
        self.return_type
    }

    /// The signature the closure was instantiated with.
    #[must_use]
    pub fn instantiated_signature(&self) -> String {
        format!("fn(&{}) -> {}", self.parameter_type, self.return_type)
    }

    #[must_use]
    pub fn is_closure(&self) -> bool {
        self.method_name == CLOSURE_MARKER
    }

    /// True when the closure is a bare method declared on the stand-in of
    /// its own parameter type, i.e. `Proxy::<Root>::get_x`.
    #[must_use]
    pub fn is_direct_reference(&self) -> bool {
        !self.is_closure() && self.declaring_type == self.parameter_type
    }

    /// Short `declaring_type#method` form used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}#{}", self.declaring_type, self.method_name)
    }
}

///
/// Target
/// The method a closure type points at, as parsed from its type name.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Target {
    pub declaring_type: &'static str,
    pub method_name: &'static str,
}

const SMART_POINTERS: &[&str] = &["Box", "Rc", "Arc"];

pub(crate) fn parse_target(signature: &'static str) -> Result<Target, &'static str> {
    let signature = signature.trim();

    if let Some(inner) = signature.strip_prefix('&') {
        let inner = inner.trim_start();
        return parse_target(inner.strip_prefix("mut ").unwrap_or(inner));
    }
    if ["fn(", "for<", "unsafe ", "extern "]
        .iter()
        .any(|prefix| signature.starts_with(prefix))
    {
        return Err("function pointers erase the referenced method; pass the fn item or a closure");
    }
    if signature.starts_with("dyn ") {
        return Err("trait objects erase the referenced method; pass the closure by value");
    }

    let Some(split) = last_top_level_separator(signature) else {
        return Err("not a reference to a function, method or closure");
    };
    let prefix = &signature[..split];
    let last = &signature[split + 2..];

    let (name, generics) = match last.find('<') {
        Some(open) if last.ends_with('>') => (&last[..open], Some(&last[open + 1..last.len() - 1])),
        _ => (last, None),
    };

    if let Some(inner) = generics
        && SMART_POINTERS.contains(&name)
    {
        return parse_target(inner);
    }
    if name.is_empty() {
        return Err("not a reference to a function, method or closure");
    }

    Ok(Target {
        declaring_type: qualified_self_type(prefix).unwrap_or(prefix),
        method_name: name,
    })
}

// Byte offset of the last `::` outside any `<..>`, `(..)` or `[..]`.
fn last_top_level_separator(signature: &str) -> Option<usize> {
    let bytes = signature.as_bytes();
    let mut depth = 0usize;
    let mut found = None;

    for (index, byte) in bytes.iter().enumerate() {
        match byte {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' if index > 0 && bytes[index - 1] == b'-' => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(index + 1) == Some(&b':') => {
                if index == 0 || bytes[index - 1] != b':' {
                    found = Some(index);
                }
            }
            _ => {}
        }
    }

    found
}

// `<A as Trait>` -> `A`
fn qualified_self_type(prefix: &'static str) -> Option<&'static str> {
    let inner = prefix.strip_prefix('<')?.strip_suffix('>')?;
    let bytes = inner.as_bytes();
    let mut depth = 0usize;

    for (index, byte) in bytes.iter().enumerate() {
        match byte {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' if index > 0 && bytes[index - 1] == b'-' => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b' ' if depth == 0 && inner[index..].starts_with(" as ") => {
                return Some(&inner[..index]);
            }
            _ => {}
        }
    }

    None
}

///
/// TESTS
///
