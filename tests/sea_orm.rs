use kriteria::prelude::*;
use pretty_assertions::assert_eq;
use sea_orm::{ColumnTrait, DbBackend, EntityTrait, QueryFilter, QueryTrait, Select};
use std::sync::Arc;

mod post {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "posts")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        pub status: i32,
        pub archived: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn posts() -> Arc<Specification<Select<post::Entity>>> {
    Specification::builder(post::Entity::find)
        .criteria(Criteria::new("title"))
        .criteria(
            Criteria::new("status").choices(ChoiceType::new([("open", 1), ("closed", 2)]).unwrap()),
        )
        .criteria(Criteria::new("archived").of(Boolean).default(false))
        .criteria(Criteria::new("search").transform(
            |query: Select<post::Entity>, values: &[Field]| {
                match values.first().and_then(Field::as_str) {
                    Some(text) => query.filter(post::Column::Title.contains(text)),
                    None => query,
                }
            },
        ))
        .order(OrderDefinition::new("title"))
        .unwrap()
        .order(OrderDefinition::parse("newest", "id DESC").unwrap())
        .unwrap()
        .default_order("newest", Direction::Ascending)
        .build()
        .unwrap()
}

fn sql<I, K, V>(input: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Field>,
{
    posts()
        .search(input)
        .unwrap()
        .query()
        .build(DbBackend::Sqlite)
        .to_string()
}

#[test]
fn test_defaults() {
    let sql = sql(Vec::<(&str, &str)>::new());

    assert!(sql.contains(r#"WHERE "posts"."archived" = "#), "{sql}");
    assert!(sql.ends_with("ORDER BY id DESC"), "{sql}");
}

#[test]
fn test_equal() {
    let sql = sql([("title", "foo"), ("status", "closed")]);

    assert!(sql.contains(r#""posts"."title" = 'foo'"#), "{sql}");
    assert!(sql.contains(r#""posts"."status" = 2"#), "{sql}");
}

#[test]
fn test_null() {
    let sql = sql([("title", Field::Null)]);

    assert!(sql.contains(r#""posts"."title" IS NULL"#), "{sql}");
}

#[test]
fn test_transform() {
    let sql = sql([("search", "foo")]);

    assert!(sql.contains(r#""posts"."title" LIKE '%foo%'"#), "{sql}");
}

#[test]
fn test_order() {
    let sql = sql([("order", "title.desc")]);
    assert!(sql.ends_with("ORDER BY title DESC"), "{sql}");

    let sql = self::sql([("order", "newest.desc")]);
    assert!(sql.ends_with("ORDER BY id DESC"), "{sql}");
}

#[test]
fn test_unknown_column() {
    assert_eq!(
        r#"SELECT "posts"."id", "posts"."title", "posts"."status", "posts"."archived" FROM "posts" WHERE "other" = 1"#,
        post::Entity::find()
            .filter_equal(&[("other", Some(&Value::Integer(1)))])
            .build(DbBackend::Sqlite)
            .to_string()
    );
}
