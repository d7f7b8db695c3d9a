use crate::order::Column;
use chumsky::prelude::*;

/// A balanced parenthesized group, so that commas inside of function calls don't split columns.
pub fn parenthesized<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Simple<'a, char>>> + Clone {
    recursive(|nested| {
        just('(')
            .ignore_then(nested.or(none_of("()").ignored()).repeated())
            .then_ignore(just(')'))
    })
}

pub fn column<'a>() -> impl Parser<'a, &'a str, Column, extra::Err<Simple<'a, char>>> + Clone {
    parenthesized()
        .or(none_of(",()").ignored())
        .repeated()
        .at_least(1)
        .to_slice()
        .filter(|s: &&str| !s.trim().is_empty())
        .map(Column::parse)
}

/// A comma separated list of order columns: `created_at DESC, id`.
pub fn columns<'a>() -> impl Parser<'a, &'a str, Vec<Column>, extra::Err<Simple<'a, char>>> {
    column()
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<_>>()
}
