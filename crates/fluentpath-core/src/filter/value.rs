use std::{
    fmt,
    time::{Duration, SystemTime},
};

///
/// Value
///
/// Operand of a filter predicate. Schema-agnostic: the type guard checks
/// the property's declared type, never the operand's.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    Int128(i128),
    Uint(u64),
    Uint128(u128),
    Float(f64),
    Text(String),
    Duration(Duration),
    Timestamp(SystemTime),
    List(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Build a list operand from any iterator of convertible values.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Char(value) => write!(f, "'{value}'"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Int128(value) => write!(f, "{value}"),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Uint128(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "\"{value}\""),
            Self::Duration(value) => write!(f, "{value:?}"),
            Self::Timestamp(value) => write!(f, "{value:?}"),
            Self::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

// conversions
macro_rules! impl_from {
    ($variant:ident => $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from!(Bool => bool);
impl_from!(Char => char);
impl_from!(Int => i8, i16, i32, i64);
impl_from!(Int128 => i128);
impl_from!(Uint => u8, u16, u32, u64);
impl_from!(Uint128 => u128);
impl_from!(Float => f32, f64);
impl_from!(Text => String, &str);
impl_from!(Duration => Duration);
impl_from!(Timestamp => SystemTime);

// pointer-sized integers narrow to 64 bits when they fit
impl From<isize> for Value {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Int128(value as i128), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Uint128(value as u128), Self::Uint)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::list(values)
    }
}
