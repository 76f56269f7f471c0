use super::*;
use crate::model::TypeKind;

fn step(path: &str, name: &'static str, kind: TypeKind) -> FieldStep {
    FieldStep::typed(&ResolvedProperty::new(path, TypeDescriptor::new(name, kind)))
}

fn age() -> FieldStep {
    step("age", "u32", TypeKind::Integer)
}

fn name() -> FieldStep {
    step("team.name", "alloc::string::String", TypeKind::Text)
}

fn mismatch_operator(err: &FilterError) -> &'static str {
    match err {
        FilterError::OperatorTypeMismatch { operator, .. } => operator,
        other => panic!("expected OperatorTypeMismatch, got {other:?}"),
    }
}

#[test]
fn numeric_operators_build_comparisons() {
    let pred = age().greater_than(30_u32).unwrap();

    assert_eq!(
        pred,
        Predicate::Compare(ComparePredicate::new(
            PropertyPath::new("age"),
            CompareOp::Gt,
            Value::Uint(30),
        ))
    );
    assert!(age().less_than_or_equal_to(65_u32).is_ok());
}

#[test]
fn numeric_operators_reject_text_properties() {
    let err = name().greater_than(3).unwrap_err();

    assert_eq!(mismatch_operator(&err), "greater_than");
    let message = err.to_string();
    assert!(message.contains("team.name"), "{message}");
    assert!(message.contains("numeric"), "{message}");
    assert!(message.contains("String"), "{message}");
}

#[test]
fn text_operators_keep_pattern_and_case_flag() {
    let pred = name().starting_with_ignore_case("Dev").unwrap();

    assert_eq!(
        pred,
        Predicate::Text(TextPredicate {
            field: PropertyPath::new("team.name"),
            op: TextOp::StartsWith,
            pattern: "Dev".to_string(),
            ignore_case: true,
        })
    );

    let err = age().containing("1").unwrap_err();
    assert_eq!(mismatch_operator(&err), "containing");
}

#[test]
fn orderable_operators_cover_text_temporal_and_bool() {
    let joined = step("joined_at", "std::time::SystemTime", TypeKind::Temporal);

    assert!(joined.after(std::time::SystemTime::UNIX_EPOCH).is_ok());
    assert!(name().between("a", "m").is_ok());

    let flag = step("active", "bool", TypeKind::Bool);
    assert!(flag.before(true).is_ok());
    assert!(flag.between(false, true).is_ok());

    let tags = step("tags", "alloc::vec::Vec<String>", TypeKind::Collection);
    assert_eq!(mismatch_operator(&tags.after(1).unwrap_err()), "after");
}

#[test]
fn between_is_inclusive_conjunction() {
    let pred = age().between(18_u32, 30_u32).unwrap();

    assert_eq!(
        pred,
        Predicate::And(vec![
            Predicate::compare(PropertyPath::new("age"), CompareOp::Gte, Value::Uint(18)),
            Predicate::compare(PropertyPath::new("age"), CompareOp::Lte, Value::Uint(30)),
        ])
    );
}

#[test]
fn bool_and_collection_guards() {
    let active = step("active", "bool", TypeKind::Bool);
    let tags = step("tags", "alloc::vec::Vec<String>", TypeKind::Collection);

    assert!(active.is_true().is_ok());
    assert!(active.is_false().is_ok());
    assert!(tags.is_empty().is_ok());
    assert!(tags.is_not_empty().is_ok());

    assert_eq!(mismatch_operator(&tags.is_true().unwrap_err()), "is_true");
    assert_eq!(mismatch_operator(&active.is_empty().unwrap_err()), "is_empty");
}

#[test]
fn map_properties_are_not_collections() {
    let scores = step(
        "scores",
        "std::collections::hash::map::HashMap<String, u32>",
        TypeKind::Map,
    );

    let err = scores.is_not_empty().unwrap_err();
    assert_eq!(mismatch_operator(&err), "is_not_empty");
    assert!(err.to_string().contains("a collection"), "{err}");
    assert_eq!(mismatch_operator(&scores.between(1, 2).unwrap_err()), "between");
    assert_eq!(
        scores.is_null(),
        Predicate::IsNull {
            field: PropertyPath::new("scores"),
        }
    );
}

#[test]
fn empty_membership_sets_short_circuit() {
    let none: Vec<u32> = Vec::new();

    assert_eq!(age().is_in(none.clone()), Predicate::False);
    assert_eq!(age().not_in(none), Predicate::True);
    assert_eq!(
        age().is_in([1_u32, 2]),
        Predicate::compare(
            PropertyPath::new("age"),
            CompareOp::In,
            Value::List(vec![Value::Uint(1), Value::Uint(2)]),
        )
    );
}

#[test]
fn untyped_steps_skip_the_guard() {
    let step = FieldStep::named("legacy.code");

    assert!(step.greater_than(1).is_ok());
    assert!(step.like("A%").is_ok());
    assert!(step.leaf_type().is_none());
}

#[test]
fn nullable_leaves_keep_their_operand_class() {
    let nickname = FieldStep::typed(&ResolvedProperty::new(
        "nickname",
        TypeDescriptor::new("alloc::string::String", TypeKind::Text)
            .into_nullable("core::option::Option<alloc::string::String>"),
    ));

    assert!(nickname.like("%kim%").is_ok());
    assert!(nickname.is_null() != nickname.is_not_null());
}
