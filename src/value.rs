use crate::order::OrderBy;
use std::fmt::{Display, Formatter};

/// A typed value, produced by casting external input.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    #[cfg(feature = "time")]
    Date(::time::Date),
    #[cfg(feature = "time")]
    DateTime(::time::OffsetDateTime),
    /// A resolved ordering expression.
    Order(OrderBy),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[cfg(feature = "time")]
    pub fn as_date(&self) -> Option<::time::Date> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    #[cfg(feature = "time")]
    pub fn as_date_time(&self) -> Option<::time::OffsetDateTime> {
        match self {
            Self::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_order(&self) -> Option<&OrderBy> {
        match self {
            Self::Order(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            #[cfg(feature = "time")]
            Self::Date(value) => write!(f, "{value}"),
            #[cfg(feature = "time")]
            Self::DateTime(value) => {
                let value = value
                    .format(&::time::format_description::well_known::Rfc3339)
                    .map_err(|_| std::fmt::Error)?;
                f.write_str(&value)
            }
            Self::Order(value) => write!(f, "{value}"),
        }
    }
}

/// The state of one attribute: never supplied (or failed to cast), explicitly null, or a value.
///
/// `Missing` is distinct from `Null`. A criterion is skipped for a missing attribute, while an
/// explicit null is a valid filter value ("IS NULL").
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Field {
    #[default]
    Missing,
    Null,
    Value(Value),
}

impl Field {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value().and_then(Value::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(Value::as_bool)
    }

    #[cfg(feature = "time")]
    pub fn as_date(&self) -> Option<::time::Date> {
        self.value().and_then(Value::as_date)
    }

    #[cfg(feature = "time")]
    pub fn as_date_time(&self) -> Option<::time::OffsetDateTime> {
        self.value().and_then(Value::as_date_time)
    }

    pub fn as_order(&self) -> Option<&OrderBy> {
        self.value().and_then(Value::as_order)
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! from_value {
    ($n:ty, $v:ident, $e:expr) => {
        impl From<$n> for Value {
            fn from($v: $n) -> Self {
                $e
            }
        }

        impl From<$n> for Field {
            fn from(value: $n) -> Self {
                Self::Value(value.into())
            }
        }

        impl From<Option<$n>> for Field {
            fn from(value: Option<$n>) -> Self {
                match value {
                    Some(value) => Self::Value(value.into()),
                    None => Self::Null,
                }
            }
        }
    };
}

from_value!(bool, value, Value::Bool(value));
from_value!(i32, value, Value::Integer(value.into()));
from_value!(i64, value, Value::Integer(value));
from_value!(u32, value, Value::Integer(value.into()));
from_value!(f64, value, Value::Float(value));
from_value!(&str, value, Value::Text(value.to_string()));
from_value!(String, value, Value::Text(value));
from_value!(OrderBy, value, Value::Order(value));
#[cfg(feature = "time")]
from_value!(::time::Date, value, Value::Date(value));
#[cfg(feature = "time")]
from_value!(::time::OffsetDateTime, value, Value::DateTime(value));

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_option_into_field() {
        assert_eq!(Field::Null, Field::from(None::<i64>));
        assert_eq!(Field::Value(Value::Integer(42)), Field::from(Some(42i64)));
    }

    #[test]
    fn test_default_is_missing() {
        assert!(Field::default().is_missing());
        assert!(!Field::Null.is_missing());
    }

    #[test]
    fn test_display() {
        assert_eq!("abc", Value::from("abc").to_string());
        assert_eq!("42", Value::from(42i64).to_string());
        assert_eq!("true", Value::from(true).to_string());
    }

    #[cfg(feature = "time")]
    #[test]
    fn test_display_time() {
        use ::time::macros::{date, datetime};

        assert_eq!("1999-12-31", Value::from(date!(1999 - 12 - 31)).to_string());
        assert_eq!(
            "1999-12-31T23:59:00Z",
            Value::from(datetime!(1999-12-31 23:59 UTC)).to_string()
        );
    }

    #[test]
    fn test_accessors() {
        let field = Field::from("abc");
        assert_eq!(Some("abc"), field.as_str());
        assert_eq!(None, field.as_i64());
        assert_eq!(Some(2.0), Field::from(2i64).as_f64());
    }
}
