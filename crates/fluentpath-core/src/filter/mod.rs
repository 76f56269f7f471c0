//! Module: filter
//! Responsibility: field steps that turn a resolved property into filter
//! predicates, after checking the operator against the declared type.
//! Does not own: query execution or translation to any query language.
//! Boundary: consumes `ResolvedProperty`; produces `Predicate` trees.

mod ast;
mod value;

#[cfg(test)]
mod tests;

pub use ast::{
    CompareOp, ComparePredicate, Predicate, PropertyPath, TextOp, TextPredicate,
};
pub use value::Value;

use crate::{error::ResolveError, model::TypeDescriptor, property::ResolvedProperty};
use thiserror::Error as ThisError;

///
/// FilterError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{operator} requires {expected} property but `{field}` is {actual}")]
    OperatorTypeMismatch {
        field: String,
        operator: &'static str,
        expected: &'static str,
        actual: String,
    },
}

///
/// OperandClass
/// Declared-type family an operator is legal for.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OperandClass {
    Numeric,
    Orderable,
    Text,
    Bool,
    Collection,
}

impl OperandClass {
    const fn admits(self, leaf: &TypeDescriptor) -> bool {
        match self {
            Self::Numeric => leaf.is_numeric(),
            Self::Orderable => leaf.is_orderable(),
            Self::Text => leaf.is_text(),
            Self::Bool => leaf.is_bool(),
            Self::Collection => leaf.is_collection(),
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::Numeric => "a numeric",
            Self::Orderable => "an orderable",
            Self::Text => "a text",
            Self::Bool => "a bool",
            Self::Collection => "a collection",
        }
    }
}

///
/// FieldStep
///
/// One property a filter condition applies to. A typed step (built from a
/// `ResolvedProperty`) rejects operators its leaf type cannot support; a
/// step built from a raw path name skips that check.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldStep {
    path: PropertyPath,
    leaf_type: Option<TypeDescriptor>,
}

impl FieldStep {
    #[must_use]
    pub fn typed(property: &ResolvedProperty) -> Self {
        Self {
            path: PropertyPath::from(property),
            leaf_type: Some(property.leaf_type()),
        }
    }

    /// Untyped step over a hand-written path.
    #[must_use]
    pub fn named(path: impl Into<PropertyPath>) -> Self {
        Self {
            path: path.into(),
            leaf_type: None,
        }
    }

    #[must_use]
    pub const fn path(&self) -> &PropertyPath {
        &self.path
    }

    #[must_use]
    pub const fn leaf_type(&self) -> Option<TypeDescriptor> {
        self.leaf_type
    }

    // ------------------------------------------------------------------
    // Any type
    // ------------------------------------------------------------------

    #[must_use]
    pub fn equal_to(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Eq, value.into())
    }

    #[must_use]
    pub fn not_equal_to(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Ne, value.into())
    }

    /// Membership; an empty set matches nothing.
    #[must_use]
    pub fn is_in<I, V>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        if values.is_empty() {
            return Predicate::False;
        }

        self.compare(CompareOp::In, Value::List(values))
    }

    /// Non-membership; an empty set matches everything.
    #[must_use]
    pub fn not_in<I, V>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        if values.is_empty() {
            return Predicate::True;
        }

        self.compare(CompareOp::NotIn, Value::List(values))
    }

    #[must_use]
    pub fn is_null(&self) -> Predicate {
        Predicate::IsNull {
            field: self.path.clone(),
        }
    }

    #[must_use]
    pub fn is_not_null(&self) -> Predicate {
        Predicate::IsNotNull {
            field: self.path.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Numeric
    // ------------------------------------------------------------------

    pub fn greater_than(&self, value: impl Into<Value>) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Numeric, "greater_than")?;
        Ok(self.compare(CompareOp::Gt, value.into()))
    }

    pub fn greater_than_or_equal_to(
        &self,
        value: impl Into<Value>,
    ) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Numeric, "greater_than_or_equal_to")?;
        Ok(self.compare(CompareOp::Gte, value.into()))
    }

    pub fn less_than(&self, value: impl Into<Value>) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Numeric, "less_than")?;
        Ok(self.compare(CompareOp::Lt, value.into()))
    }

    pub fn less_than_or_equal_to(&self, value: impl Into<Value>) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Numeric, "less_than_or_equal_to")?;
        Ok(self.compare(CompareOp::Lte, value.into()))
    }

    // ------------------------------------------------------------------
    // Orderable
    // ------------------------------------------------------------------

    /// Inclusive on both ends.
    pub fn between(
        &self,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Orderable, "between")?;
        Ok(Predicate::all(vec![
            self.compare(CompareOp::Gte, start.into()),
            self.compare(CompareOp::Lte, end.into()),
        ]))
    }

    pub fn after(&self, value: impl Into<Value>) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Orderable, "after")?;
        Ok(self.compare(CompareOp::Gt, value.into()))
    }

    pub fn before(&self, value: impl Into<Value>) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Orderable, "before")?;
        Ok(self.compare(CompareOp::Lt, value.into()))
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    pub fn like(&self, pattern: impl Into<String>) -> Result<Predicate, FilterError> {
        self.text("like", TextOp::Like, pattern.into(), false)
    }

    pub fn not_like(&self, pattern: impl Into<String>) -> Result<Predicate, FilterError> {
        self.text("not_like", TextOp::NotLike, pattern.into(), false)
    }

    pub fn containing(&self, value: impl Into<String>) -> Result<Predicate, FilterError> {
        self.text("containing", TextOp::Contains, value.into(), false)
    }

    pub fn not_containing(&self, value: impl Into<String>) -> Result<Predicate, FilterError> {
        self.text("not_containing", TextOp::NotContains, value.into(), false)
    }

    pub fn starting_with(&self, value: impl Into<String>) -> Result<Predicate, FilterError> {
        self.text("starting_with", TextOp::StartsWith, value.into(), false)
    }

    pub fn ending_with(&self, value: impl Into<String>) -> Result<Predicate, FilterError> {
        self.text("ending_with", TextOp::EndsWith, value.into(), false)
    }

    pub fn like_ignore_case(&self, pattern: impl Into<String>) -> Result<Predicate, FilterError> {
        self.text("like_ignore_case", TextOp::Like, pattern.into(), true)
    }

    pub fn containing_ignore_case(
        &self,
        value: impl Into<String>,
    ) -> Result<Predicate, FilterError> {
        self.text("containing_ignore_case", TextOp::Contains, value.into(), true)
    }

    pub fn starting_with_ignore_case(
        &self,
        value: impl Into<String>,
    ) -> Result<Predicate, FilterError> {
        self.text("starting_with_ignore_case", TextOp::StartsWith, value.into(), true)
    }

    pub fn ending_with_ignore_case(
        &self,
        value: impl Into<String>,
    ) -> Result<Predicate, FilterError> {
        self.text("ending_with_ignore_case", TextOp::EndsWith, value.into(), true)
    }

    // ------------------------------------------------------------------
    // Bool
    // ------------------------------------------------------------------

    pub fn is_true(&self) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Bool, "is_true")?;
        Ok(self.compare(CompareOp::Eq, Value::Bool(true)))
    }

    pub fn is_false(&self) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Bool, "is_false")?;
        Ok(self.compare(CompareOp::Eq, Value::Bool(false)))
    }

    // ------------------------------------------------------------------
    // Collection
    // ------------------------------------------------------------------

    pub fn is_empty(&self) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Collection, "is_empty")?;
        Ok(Predicate::IsEmpty {
            field: self.path.clone(),
        })
    }

    pub fn is_not_empty(&self) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Collection, "is_not_empty")?;
        Ok(Predicate::IsNotEmpty {
            field: self.path.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn compare(&self, op: CompareOp, value: Value) -> Predicate {
        Predicate::compare(self.path.clone(), op, value)
    }

    fn text(
        &self,
        operator: &'static str,
        op: TextOp,
        pattern: String,
        ignore_case: bool,
    ) -> Result<Predicate, FilterError> {
        self.ensure(OperandClass::Text, operator)?;

        Ok(Predicate::Text(TextPredicate {
            field: self.path.clone(),
            op,
            pattern,
            ignore_case,
        }))
    }

    fn ensure(&self, class: OperandClass, operator: &'static str) -> Result<(), FilterError> {
        match self.leaf_type {
            Some(leaf) if !class.admits(&leaf) => Err(FilterError::OperatorTypeMismatch {
                field: self.path.to_string(),
                operator,
                expected: class.expected(),
                actual: leaf.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
