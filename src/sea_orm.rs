use crate::order::{Direction, OrderBy};
use crate::query::Queryable;
use crate::value::Value;
use sea_orm::sea_query::{Alias, Expr, IntoCondition, Order};
use sea_orm::{Condition, EntityTrait, QueryFilter, QueryOrder, Select};
use std::str::FromStr;

impl<E> Queryable for Select<E>
where
    E: EntityTrait,
{
    fn filter_equal(self, conditions: &[(&str, Option<&Value>)]) -> Self {
        let mut condition = Condition::all();
        for (name, value) in conditions {
            condition = condition.add(translate_equal::<E>(name, *value));
        }
        self.filter(condition)
    }

    fn order_by_expression(self, order: &OrderBy) -> Self {
        let mut query = self;
        for column in &order.columns {
            let expression = Expr::cust(column.expression.clone());
            query = query.order_by(expression, translate_direction(column.direction));
        }
        query
    }
}

/// Translate a column equality into a condition. A value of `None` turns into `IS NULL`.
pub fn translate_equal<E>(name: &str, value: Option<&Value>) -> Condition
where
    E: EntityTrait,
{
    let column = translate_column::<E>(name);
    match value {
        Some(value) => column.eq(translate_value(value)).into_condition(),
        None => column.is_null().into_condition(),
    }
}

/// Translate an attribute name into a column of the entity, or an unqualified column if the
/// entity has no such column.
pub fn translate_column<E>(name: &str) -> Expr
where
    E: EntityTrait,
{
    match E::Column::from_str(name) {
        Ok(column) => Expr::col((E::default(), column)),
        Err(_) => Expr::col(Alias::new(name)),
    }
}

pub fn translate_value(value: &Value) -> sea_orm::Value {
    match value {
        Value::Bool(value) => (*value).into(),
        Value::Integer(value) => (*value).into(),
        Value::Float(value) => (*value).into(),
        Value::Text(value) => value.clone().into(),
        #[cfg(feature = "time")]
        Value::Date(value) => (*value).into(),
        #[cfg(feature = "time")]
        Value::DateTime(value) => (*value).into(),
        Value::Order(value) => value.to_string().into(),
    }
}

pub fn translate_direction(direction: Direction) -> Order {
    match direction {
        Direction::Ascending => Order::Asc,
        Direction::Descending => Order::Desc,
    }
}
