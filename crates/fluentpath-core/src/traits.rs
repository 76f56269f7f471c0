//! Module: traits
//! Responsibility: the `Recordable` contract and its std implementations.
//! Does not own: proxy interception or accessor generation.
//! Boundary: implemented by `#[derive(Recordable)]` and by this module.

use crate::model::{EntityModel, TypeDescriptor, TypeKind};
use std::{
    any::type_name,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    marker::PhantomData,
    time::{Duration, SystemTime},
};

///
/// Recordable
///
/// A type that can appear as the declared type of an accessor, or as the
/// root of an accessor chain.
///
/// `stand_in` synthesizes the value a proxy stands in for. `None` means the
/// type has no no-argument constructor (no `Default`), so the recorder can
/// never navigate into it.
///

pub trait Recordable: Sized + 'static {
    fn descriptor() -> TypeDescriptor;

    fn stand_in() -> Option<Self>;

    /// Accessor table; only entities have one.
    fn model() -> Option<&'static EntityModel> {
        None
    }
}

// leaf impls
macro_rules! impl_leaf {
    ($kind:ident => $($ty:ty),* $(,)?) => {
        $(
            impl Recordable for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::new(type_name::<Self>(), TypeKind::$kind)
                }

                fn stand_in() -> Option<Self> {
                    Some(Self::default())
                }
            }
        )*
    };
}

impl_leaf!(Bool => bool);
impl_leaf!(Char => char);
impl_leaf!(Float => f32, f64);
impl_leaf!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_leaf!(Text => String);
impl_leaf!(Temporal => Duration);

impl Recordable for SystemTime {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new(type_name::<Self>(), TypeKind::Temporal)
    }

    fn stand_in() -> Option<Self> {
        Some(Self::UNIX_EPOCH)
    }
}

// containers never navigate; their element type is not recorded
macro_rules! impl_container {
    ($kind:ident => $($ty:ident < $($param:ident),+ >),* $(,)?) => {
        $(
            impl<$($param: 'static),+> Recordable for $ty<$($param),+> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::new(type_name::<Self>(), TypeKind::$kind)
                }

                fn stand_in() -> Option<Self> {
                    Some($ty::new())
                }
            }
        )*
    };
}

impl_container!(Collection => Vec<T>, VecDeque<T>, BTreeSet<T>, HashSet<T>);
impl_container!(Map => BTreeMap<K, V>, HashMap<K, V>);

impl<T: Recordable> Recordable for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor().into_nullable(type_name::<Self>())
    }

    // the absent representation is always available
    fn stand_in() -> Option<Self> {
        Some(None)
    }

    fn model() -> Option<&'static EntityModel> {
        T::model()
    }
}

///
/// StandInProbe
///
/// Autoref-specialization probe used by derived impls: in a concrete context
/// `(&StandInProbe::<T>::new()).probe_stand_in()` resolves to `ViaDefault`
/// when `T: Default` and falls back to `ViaNone` otherwise.
///

pub struct StandInProbe<T>(PhantomData<T>);

impl<T> StandInProbe<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for StandInProbe<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait ViaDefault<T> {
    fn probe_stand_in(&self) -> Option<T>;
}

impl<T: Default> ViaDefault<T> for StandInProbe<T> {
    fn probe_stand_in(&self) -> Option<T> {
        Some(T::default())
    }
}

pub trait ViaNone<T> {
    fn probe_stand_in(&self) -> Option<T>;
}

impl<T> ViaNone<T> for &StandInProbe<T> {
    fn probe_stand_in(&self) -> Option<T> {
        None
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, PartialEq, Debug)]
    struct WithDefault(u8);

    struct WithoutDefault;

    #[test]
    fn probe_prefers_default_when_available() {
        let found = (&StandInProbe::<WithDefault>::new()).probe_stand_in();
        assert_eq!(found, Some(WithDefault(0)));

        let missing = (&StandInProbe::<WithoutDefault>::new()).probe_stand_in();
        assert!(missing.is_none());
    }

    #[test]
    fn std_leaves_have_sentinels() {
        assert_eq!(u64::stand_in(), Some(0));
        assert_eq!(bool::stand_in(), Some(false));
        assert_eq!(String::stand_in(), Some(String::new()));
        assert_eq!(Option::<u32>::stand_in(), Some(None));
        assert_eq!(Vec::<u8>::stand_in(), Some(Vec::new()));
    }

    #[test]
    fn option_descriptor_is_nullable_inner_kind() {
        let descriptor = Option::<i64>::descriptor();

        assert_eq!(descriptor.kind, TypeKind::Integer);
        assert!(descriptor.nullable);
        assert!(descriptor.name.contains("Option"));
    }

    #[test]
    fn collections_are_collection_kind() {
        assert!(BTreeSet::<u8>::descriptor().is_collection());
        assert!(!Vec::<u8>::descriptor().is_orderable());
    }

    #[test]
    fn maps_are_not_collections() {
        let map = HashMap::<String, u8>::descriptor();

        assert_eq!(map.kind, TypeKind::Map);
        assert!(!map.is_collection());
        assert!(map.is_leaf());
        assert_eq!(BTreeMap::<u8, u8>::stand_in(), Some(BTreeMap::new()));
    }
}
