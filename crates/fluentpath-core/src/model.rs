//! Runtime type model.
//!
//! The derive emits these as statics; resolvers and the filter type guard
//! read them. Nothing here is schema-aware: a `TypeDescriptor` only says what
//! shape a declared accessor return type has, and whether the recorder can
//! navigate through it.

use serde::Serialize;
use std::fmt;

///
/// TypeKind
///
/// Coarse shape of a declared type.
/// Leaf kinds get a default sentinel during recording, `Entity` gets a
/// navigable stand-in, `Interface` and `Sealed` may only end a chain.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TypeKind {
    // Scalars
    Bool,
    Char,
    Float,
    Integer,
    Temporal,
    Text,

    // Other leaves
    Collection,
    Enum,
    Map,
    Opaque,

    // Navigable and blocked shapes
    Entity,
    Interface,
    Sealed,
}

impl TypeKind {
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        !matches!(self, Self::Entity | Self::Interface | Self::Sealed)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Temporal => "temporal",
            Self::Text => "text",
            Self::Collection => "collection",
            Self::Enum => "enum",
            Self::Map => "map",
            Self::Opaque => "opaque",
            Self::Entity => "entity",
            Self::Interface => "interface",
            Self::Sealed => "sealed",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// TypeDescriptor
///
/// Declared type of an accessor (or of a chain root).
/// `name` is the fully-qualified Rust type name; `nullable` is set when the
/// declared type is an `Option` wrapper around `kind`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub kind: TypeKind,
    pub nullable: bool,
}

impl TypeDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    /// Descriptor of any recordable type.
    #[must_use]
    pub fn of<T: crate::traits::Recordable>() -> Self {
        T::descriptor()
    }

    #[must_use]
    pub const fn into_nullable(self, name: &'static str) -> Self {
        Self {
            name,
            kind: self.kind,
            nullable: true,
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.kind, TypeKind::Integer | TypeKind::Float)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, TypeKind::Text)
    }

    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self.kind, TypeKind::Bool)
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self.kind, TypeKind::Collection)
    }

    /// Types with a total order the query layer can compare against.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Bool
                | TypeKind::Integer
                | TypeKind::Float
                | TypeKind::Char
                | TypeKind::Text
                | TypeKind::Temporal
                | TypeKind::Enum
        )
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

///
/// AccessorModel
/// One generated accessor: its method name, the property it exposes and
/// the declared return type.
///

#[derive(Clone, Copy, Debug)]
pub struct AccessorModel {
    pub method: &'static str,
    pub property: &'static str,
    pub returns: fn() -> TypeDescriptor,
}

///
/// EntityModel
/// Macro-generated accessor table for one recordable struct.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for diagnostics).
    pub path: &'static str,
    /// Accessors in field declaration order.
    pub accessors: &'static [AccessorModel],
}

impl EntityModel {
    /// Look up an accessor by its method name.
    #[must_use]
    pub fn accessor(&self, method: &str) -> Option<&AccessorModel> {
        self.accessors.iter().find(|accessor| accessor.method == method)
    }

    /// Look up an accessor by the property it exposes.
    #[must_use]
    pub fn property(&self, property: &str) -> Option<&AccessorModel> {
        self.accessors
            .iter()
            .find(|accessor| accessor.property == property)
    }
}

///
/// TESTS
///
