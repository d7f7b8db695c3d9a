use crate::choice::ChoiceType;
use crate::error::Error;
use crate::parser;
use crate::types::Type;
use crate::value::Value;
use chumsky::Parser;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DEFAULT_ASC_SUFFIX: &str = ".asc";
pub const DEFAULT_DESC_SUFFIX: &str = ".desc";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else {
            Err(Error::InvalidDirection(s.to_string()))
        }
    }
}

impl TryFrom<&str> for Direction {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `true` means ascending. There is no flag for descending.
impl TryFrom<bool> for Direction {
    type Error = Error;

    fn try_from(value: bool) -> Result<Self, Self::Error> {
        match value {
            true => Ok(Self::Ascending),
            false => Err(Error::InvalidDirection(value.to_string())),
        }
    }
}

/// One column of an ordering expression.
///
/// A column with a fixed direction keeps it when the ordering is reversed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Column {
    pub expression: String,
    pub direction: Direction,
    pub fixed: bool,
}

impl Column {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            direction: Direction::Ascending,
            fixed: false,
        }
    }

    pub fn fixed(expression: impl Into<String>, direction: Direction) -> Self {
        Self {
            expression: expression.into(),
            direction,
            fixed: true,
        }
    }

    /// Parse a single column, where a trailing `ASC` or `DESC` fixes the direction.
    pub fn parse(column: &str) -> Self {
        let column = column.trim();
        if let Some((expression, direction)) = column.rsplit_once(char::is_whitespace) {
            if let Ok(direction) = direction.parse::<Direction>() {
                return Self::fixed(expression.trim_end(), direction);
            }
        }
        Self::new(column)
    }

    pub fn reversed(&self) -> Self {
        match self.fixed {
            true => self.clone(),
            false => Self {
                direction: self.direction.opposite(),
                ..self.clone()
            },
        }
    }
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.fixed, self.direction) {
            (false, Direction::Ascending) => f.write_str(&self.expression),
            (_, Direction::Ascending) => write!(f, "{} ASC", self.expression),
            (_, Direction::Descending) => write!(f, "{} DESC", self.expression),
        }
    }
}

/// An ordering expression: a list of columns with their directions.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct OrderBy {
    pub columns: Vec<Column>,
}

impl OrderBy {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn parse(columns: &str) -> Result<Self, Error> {
        parser::columns()
            .parse(columns)
            .into_result()
            .map(Self::new)
            .map_err(|_| Error::InvalidColumns(columns.to_string()))
    }

    /// Reverse the direction of all columns which don't have a fixed direction.
    pub fn reversed(&self) -> Self {
        Self {
            columns: self.columns.iter().map(Column::reversed).collect(),
        }
    }
}

impl Display for OrderBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}")?;
        }
        Ok(())
    }
}

/// A named, sortable dimension with an ascending and a descending choice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderDefinition {
    name: String,
    asc_choice: String,
    desc_choice: String,
    asc_value: OrderBy,
    desc_value: OrderBy,
}

impl OrderDefinition {
    /// Order by a column of the same name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let columns = vec![Column::new(name.clone())];
        Self::with_columns(name, columns)
    }

    /// Order by the given columns. Falls back to a column named like the order if empty.
    pub fn with_columns<I, C>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        let name = name.into();
        let mut columns = columns.into_iter().map(Into::into).collect::<Vec<_>>();
        if columns.is_empty() {
            columns.push(Column::new(name.clone()));
        }

        let asc_value = OrderBy::new(columns);
        let desc_value = asc_value.reversed();

        let mut result = Self {
            asc_choice: String::new(),
            desc_choice: String::new(),
            name,
            asc_value,
            desc_value,
        };
        result.set_choices(DEFAULT_ASC_SUFFIX, DEFAULT_DESC_SUFFIX);
        result
    }

    /// Order by columns given as a string: `created_at DESC, id`.
    pub fn parse(name: impl Into<String>, columns: &str) -> Result<Self, Error> {
        Ok(Self::with_columns(name, OrderBy::parse(columns)?.columns))
    }

    pub fn suffixes(mut self, asc_suffix: &str, desc_suffix: &str) -> Self {
        self.set_choices(asc_suffix, desc_suffix);
        self
    }

    fn set_choices(&mut self, asc_suffix: &str, desc_suffix: &str) {
        self.asc_choice = format!("{}{asc_suffix}", self.name);
        self.desc_choice = match self.asc_value == self.desc_value {
            true => self.asc_choice.clone(),
            false => format!("{}{desc_suffix}", self.name),
        };
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn asc_choice(&self) -> &str {
        &self.asc_choice
    }

    pub fn desc_choice(&self) -> &str {
        &self.desc_choice
    }

    pub fn asc_value(&self) -> &OrderBy {
        &self.asc_value
    }

    pub fn desc_value(&self) -> &OrderBy {
        &self.desc_value
    }

    pub fn choice_for_direction(&self, direction: Direction) -> &str {
        match direction {
            Direction::Ascending => &self.asc_choice,
            Direction::Descending => &self.desc_choice,
        }
    }

    /// Like [`Self::choice_for_direction`], but taking `asc` or `desc` in any case, or `true`
    /// for ascending.
    pub fn choice_for<D>(&self, direction: D) -> Result<&str, Error>
    where
        D: TryInto<Direction, Error = Error>,
    {
        Ok(self.choice_for_direction(direction.try_into()?))
    }

    pub fn value_for_direction(&self, direction: Direction) -> &OrderBy {
        match direction {
            Direction::Ascending => &self.asc_value,
            Direction::Descending => &self.desc_value,
        }
    }
}

/// Choices synthesized from order definitions, each resolving to an [`OrderBy`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderType {
    choices: ChoiceType,
    definitions: Vec<OrderDefinition>,
    reverse: Vec<(OrderBy, String, Direction)>,
}

impl OrderType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_definition(&mut self, definition: OrderDefinition) -> Result<(), Error> {
        if self.definition(definition.name()).is_some() {
            return Err(Error::DuplicateOrder(definition.name().to_string()));
        }

        for direction in [Direction::Ascending, Direction::Descending] {
            let choice = definition.choice_for_direction(direction).to_string();
            let value = definition.value_for_direction(direction).clone();
            self.choices.set(choice, Value::Order(value.clone()));

            if direction == Direction::Descending && definition.asc_value == definition.desc_value {
                continue;
            }
            self.reverse.retain(|(v, _, _)| *v != value);
            self.reverse
                .push((value, definition.name().to_string(), direction));
        }

        self.definitions.push(definition);
        Ok(())
    }

    pub fn definition(&self, name: &str) -> Option<&OrderDefinition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &OrderDefinition> {
        self.definitions.iter()
    }

    pub fn mapping(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.choices.mapping()
    }

    /// The order name and direction an ordering expression belongs to.
    pub fn direction_of(&self, value: &OrderBy) -> Option<(&str, Direction)> {
        self.reverse
            .iter()
            .find(|(v, _, _)| v == value)
            .map(|(_, name, direction)| (name.as_str(), *direction))
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Type for OrderType {
    /// Cast a choice to its ordering expression. A bare order name means ascending.
    fn cast(&self, value: &Value) -> Option<Value> {
        self.choices.cast(value).or_else(|| match value {
            Value::Text(name) => self
                .definition(name)
                .map(|definition| Value::Order(definition.asc_value.clone())),
            _ => None,
        })
    }

    fn serialize(&self, value: &Value) -> String {
        match self.choices.token_for(value) {
            Some(token) => token.to_string(),
            None => value.to_string(),
        }
    }

    fn choices(&self) -> Option<&ChoiceType> {
        Some(&self.choices)
    }
}
