use kriteria::prelude::*;
use pretty_assertions::assert_eq;

fn order_type(definitions: impl IntoIterator<Item = OrderDefinition>) -> OrderType {
    let mut result = OrderType::new();
    for definition in definitions {
        result.add_definition(definition).unwrap();
    }
    result
}

#[test]
fn test_definition() {
    let definition = OrderDefinition::new("title");

    assert_eq!("title", definition.name());
    assert_eq!("title.asc", definition.asc_choice());
    assert_eq!("title.desc", definition.desc_choice());
    assert_eq!("title", definition.asc_value().to_string());
    assert_eq!("title DESC", definition.desc_value().to_string());
}

#[test]
fn test_definition_columns() {
    let definition = OrderDefinition::parse("newest", "created_at DESC, lower(name), id").unwrap();

    assert_eq!(
        "created_at DESC, lower(name), id",
        definition.asc_value().to_string()
    );
    assert_eq!(
        "created_at DESC, lower(name) DESC, id DESC",
        definition.desc_value().to_string()
    );

    let definition = OrderDefinition::with_columns("name", Vec::<&str>::new());
    assert_eq!("name", definition.asc_value().to_string());
}

#[test]
fn test_definition_fixed() {
    let definition = OrderDefinition::parse("id", "id ASC").unwrap();

    assert_eq!("id.asc", definition.asc_choice());
    assert_eq!("id.asc", definition.desc_choice());
    assert_eq!(definition.asc_value(), definition.desc_value());
}

#[test]
fn test_definition_suffixes() {
    let definition = OrderDefinition::new("title").suffixes("_up", "_down");

    assert_eq!("title_up", definition.choice_for_direction(Direction::Ascending));
    assert_eq!("title_down", definition.choice_for_direction(Direction::Descending));
}

#[test]
fn test_choice_for() {
    let definition = OrderDefinition::new("title");

    assert_eq!(Ok("title.asc"), definition.choice_for("asc"));
    assert_eq!(Ok("title.desc"), definition.choice_for("DESC"));
    assert_eq!(Ok("title.asc"), definition.choice_for(true));
    assert_eq!(
        Err(Error::InvalidDirection("false".into())),
        definition.choice_for(false)
    );
    assert_eq!(
        Err(Error::InvalidDirection("sideways".into())),
        definition.choice_for("sideways")
    );
}

#[test]
fn test_cast() {
    let ty = order_type([OrderDefinition::new("title"), OrderDefinition::new("id")]);
    let title = ty.definition("title").unwrap().clone();

    assert_eq!(
        Some(Value::Order(title.desc_value().clone())),
        ty.cast(&"title.desc".into())
    );
    assert_eq!(
        Some(Value::Order(title.asc_value().clone())),
        ty.cast(&"title".into())
    );
    assert_eq!(None, ty.cast(&"bogus".into()));
    assert_eq!(None, ty.cast(&"title.sideways".into()));
}

#[test]
fn test_cast_is_idempotent() {
    let ty = order_type([OrderDefinition::new("title"), OrderDefinition::new("id")]);

    for (token, _) in ty.mapping() {
        let cast = ty.cast(&token.into()).unwrap();
        assert_eq!(Some(cast.clone()), ty.cast(&cast), "{token}");
        assert_eq!(token, ty.serialize(&cast));
    }
}

#[test]
fn test_mapping_order() {
    let ty = order_type([OrderDefinition::new("title"), OrderDefinition::new("id")]);

    assert_eq!(
        vec!["title.asc", "title.desc", "id.asc", "id.desc"],
        ty.mapping().map(|(token, _)| token).collect::<Vec<_>>()
    );
}

#[test]
fn test_direction_of() {
    let ty = order_type([
        OrderDefinition::new("title"),
        OrderDefinition::parse("id", "id ASC").unwrap(),
    ]);
    let title = ty.definition("title").unwrap().clone();
    let id = ty.definition("id").unwrap().clone();

    assert_eq!(
        Some(("title", Direction::Descending)),
        ty.direction_of(title.desc_value())
    );
    assert_eq!(
        Some(("id", Direction::Ascending)),
        ty.direction_of(id.desc_value())
    );
    assert_eq!(None, ty.direction_of(&OrderBy::parse("other").unwrap()));
}

#[test]
fn test_same_expression() {
    let ty = order_type([
        OrderDefinition::new("title"),
        OrderDefinition::with_columns("name", ["title"]),
    ]);
    let value = OrderBy::parse("title").unwrap();

    assert_eq!(Some(("name", Direction::Ascending)), ty.direction_of(&value));
}

#[test]
fn test_duplicate() {
    let mut ty = order_type([OrderDefinition::new("title")]);

    assert_eq!(
        Err(Error::DuplicateOrder("title".into())),
        ty.add_definition(OrderDefinition::parse("title", "name").unwrap())
    );
}
