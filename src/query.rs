use crate::order::OrderBy;
use crate::value::Value;

/// The query being narrowed down by a search.
///
/// Implemented for SeaORM's `Select` with the `sea-orm` feature. Every call returns a new
/// query, the search never inspects it.
pub trait Queryable: Sized {
    /// Restrict to rows where each column equals its value. `None` stands for `IS NULL`.
    fn filter_equal(self, conditions: &[(&str, Option<&Value>)]) -> Self;

    fn order_by_expression(self, order: &OrderBy) -> Self;
}
