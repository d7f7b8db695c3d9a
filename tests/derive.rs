use kriteria::prelude::*;
use pretty_assertions::assert_eq;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Choices)]
enum Status {
    Draft,
    #[choice(alias = "live", alias = "public")]
    Published,
    #[choice(rename = "closed")]
    Archived,
    NeedsReview,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Choices)]
#[choices(integer)]
enum Priority {
    Low,
    Normal,
    High,
}

#[test]
fn test_tokens() {
    let choices = Status::choice_type().unwrap();

    assert_eq!(
        vec!["draft", "published", "live", "public", "closed", "needs_review"],
        choices.tokens().collect::<Vec<_>>()
    );
    assert_eq!("needs_review", Status::NeedsReview.token());
    assert_eq!("closed", Status::Archived.token());
}

#[test]
fn test_aliases() {
    let choices = Status::choice_type().unwrap();

    assert_eq!(Some(Value::from(Status::Published)), choices.cast(&"live".into()));
    assert_eq!(Some(Value::from(Status::Published)), choices.cast(&"public".into()));
    assert_eq!(Some("published"), choices.token_for(&Status::Published.into()));
}

#[test]
fn test_integer() {
    let choices = Priority::choice_type().unwrap();

    assert_eq!(Value::Integer(2), Value::from(Priority::High));
    assert_eq!(Some(Value::Integer(1)), choices.cast(&"normal".into()));
    assert_eq!(Some(Value::Integer(1)), choices.cast(&Value::Integer(1)));
    assert_eq!(None, choices.cast(&"urgent".into()));
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Choices)]
#[choices(integer)]
enum Severity {
    Minor = 10,
    Major = 20,
    Blocker,
}

#[test]
fn test_integer_discriminant() {
    let choices = Severity::choice_type().unwrap();

    assert_eq!(Value::Integer(10), Value::from(Severity::Minor));
    assert_eq!(Some(Value::Integer(20)), choices.cast(&"major".into()));
    assert_eq!(Some(Value::Integer(21)), choices.cast(&"blocker".into()));
    assert_eq!(Some("minor"), choices.token_for(&Value::Integer(10)));
}

#[test]
fn test_criteria() {
    #[derive(Clone, Debug, Default, PartialEq)]
    struct Filters(Vec<String>);

    impl Queryable for Filters {
        fn filter_equal(mut self, conditions: &[(&str, Option<&Value>)]) -> Self {
            for (name, value) in conditions {
                self.0.push(format!("{name}={value:?}"));
            }
            self
        }

        fn order_by_expression(self, _: &OrderBy) -> Self {
            self
        }
    }

    let specification = Specification::builder(Filters::default)
        .criteria(Criteria::new("priority").choices(Priority::choice_type().unwrap()))
        .build()
        .unwrap();

    let search = specification.search([("priority", "high")]).unwrap();
    assert_eq!(Some(&Field::from(Priority::High)), search.get("priority"));
    assert_eq!(
        Filters(vec![r#"priority=Some(Integer(2))"#.to_string()]),
        search.query()
    );
    assert_eq!(
        vec![("low", false), ("normal", false), ("high", true)],
        search.each_choice("priority").unwrap()
    );
}
