use fluentpath::{
    config::ResolverConfig,
    filter::{CompareOp, FilterError, TextOp, Value},
    prelude::*,
};

#[derive(Debug, Default, Recordable)]
pub struct Team {
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, Recordable)]
pub enum Grade {
    #[default]
    Junior,
    Senior,
}

#[derive(Debug, Default, Recordable)]
pub struct Member {
    pub name: String,
    pub email: Option<String>,
    pub age: u32,
    pub score: f64,
    pub active: bool,
    pub grade: Grade,
    pub team: Team,
}

fn resolver() -> PropertyResolver {
    PropertyResolver::new(ResolverConfig::default())
}

#[test]
fn builds_a_combined_filter_from_accessors() {
    let resolver = resolver();
    let age = resolver.field(Proxy::<Member>::get_age).unwrap();
    let team = resolver
        .field(|m: &Proxy<Member>| m.get_team().get_name())
        .unwrap();
    let active = resolver.field(Proxy::<Member>::is_active).unwrap();

    let filter = age.between(20_u32, 40_u32).unwrap()
        & (team.containing_ignore_case("dev").unwrap() | team.equal_to("ops"))
        & active.is_true().unwrap().not();

    let fields = filter
        .fields()
        .into_iter()
        .map(|field| field.as_str().to_string())
        .collect::<Vec<_>>();
    assert_eq!(fields, ["age", "age", "team.name", "team.name", "active"]);
}

#[test]
fn operators_are_checked_against_the_leaf_type() {
    let resolver = resolver();
    let name = resolver.field(Proxy::<Member>::get_name).unwrap();
    let score = resolver.field(Proxy::<Member>::get_score).unwrap();
    let grade = resolver.field(Proxy::<Member>::get_grade).unwrap();
    let tags = resolver
        .field(|m: &Proxy<Member>| m.get_team().get_tags())
        .unwrap();

    assert!(score.greater_than_or_equal_to(1.5).is_ok());
    assert!(grade.after("Junior").is_ok());
    assert!(tags.is_not_empty().is_ok());

    for err in [
        name.less_than(3).unwrap_err(),
        score.like("%1%").unwrap_err(),
        grade.is_true().unwrap_err(),
        tags.before(1).unwrap_err(),
    ] {
        assert!(matches!(err, FilterError::OperatorTypeMismatch { .. }), "{err}");
    }
}

#[test]
fn nullable_text_supports_text_and_null_operators() {
    let email = resolver().field(Proxy::<Member>::get_email).unwrap();

    assert!(email.leaf_type().is_some_and(|leaf| leaf.nullable));
    assert!(matches!(email.is_null(), Predicate::IsNull { .. }));

    match email.ending_with("@example.com").unwrap() {
        Predicate::Text(text) => {
            assert_eq!(text.op, TextOp::EndsWith);
            assert!(!text.ignore_case);
        }
        other => panic!("unexpected predicate {other:?}"),
    }
}

#[test]
fn membership_with_values() {
    let grade = resolver().field(Proxy::<Member>::get_grade).unwrap();

    match grade.not_in(["Senior"]) {
        Predicate::Compare(compare) => {
            assert_eq!(compare.op, CompareOp::NotIn);
            assert_eq!(compare.value, Value::List(vec![Value::from("Senior")]));
        }
        other => panic!("unexpected predicate {other:?}"),
    }
    assert_eq!(grade.is_in(Vec::<&str>::new()), Predicate::False);
}

#[test]
fn resolution_errors_convert_into_filter_errors() {
    fn lower_name(resolver: &PropertyResolver) -> Result<Predicate, FilterError> {
        let step = resolver.field(|m: &Proxy<Member>| m.get_name().to_lowercase())?;

        Ok(step.is_not_null())
    }

    assert!(matches!(lower_name(&resolver()), Err(FilterError::Resolve(_))));
}
