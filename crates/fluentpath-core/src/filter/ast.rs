use crate::{filter::value::Value, property::ResolvedProperty};
use std::{
    fmt,
    ops::{BitAnd, BitOr},
    sync::Arc,
};

///
/// Predicate AST
///
/// Pure representation of filter predicates over property paths. It carries
/// no query-language semantics; a persistence layer walks it and translates
/// each node.
///

///
/// PropertyPath
/// Dot-separated property path a predicate applies to.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PropertyPath(Arc<str>);

impl PropertyPath {
    #[must_use]
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, root-most first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl From<&ResolvedProperty> for PropertyPath {
    fn from(property: &ResolvedProperty) -> Self {
        Self::new(property.path())
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PropertyPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub field: PropertyPath,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub const fn new(field: PropertyPath, op: CompareOp, value: Value) -> Self {
        Self { field, op, value }
    }
}

///
/// TextOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextOp {
    Like,
    NotLike,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

///
/// TextPredicate
/// `pattern` is passed through untouched; `Like` patterns keep their
/// wildcards for the consumer to interpret.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextPredicate {
    pub field: PropertyPath,
    pub op: TextOp,
    pub pattern: String,
    pub ignore_case: bool,
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    Text(TextPredicate),
    IsNull { field: PropertyPath },
    IsNotNull { field: PropertyPath },
    IsEmpty { field: PropertyPath },
    IsNotEmpty { field: PropertyPath },
}

impl Predicate {
    #[must_use]
    pub const fn all(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn any(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    /// Conjunction; nested conjunctions on the left are flattened.
    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        match self {
            Self::And(mut preds) => {
                preds.push(rhs);
                Self::And(preds)
            }
            lhs => Self::And(vec![lhs, rhs]),
        }
    }

    /// Disjunction; nested disjunctions on the left are flattened.
    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        match self {
            Self::Or(mut preds) => {
                preds.push(rhs);
                Self::Or(preds)
            }
            lhs => Self::Or(vec![lhs, rhs]),
        }
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    pub(crate) const fn compare(field: PropertyPath, op: CompareOp, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, op, value))
    }

    /// Every property path this predicate references, in tree order.
    #[must_use]
    pub fn fields(&self) -> Vec<&PropertyPath> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);

        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a PropertyPath>) {
        match self {
            Self::True | Self::False => {}
            Self::And(preds) | Self::Or(preds) => {
                for pred in preds {
                    pred.collect_fields(out);
                }
            }
            Self::Not(pred) => pred.collect_fields(out),
            Self::Compare(compare) => out.push(&compare.field),
            Self::Text(text) => out.push(&text.field),
            Self::IsNull { field }
            | Self::IsNotNull { field }
            | Self::IsEmpty { field }
            | Self::IsNotEmpty { field } => out.push(field),
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}
