#[cfg(feature = "time")]
mod time;

#[cfg(feature = "time")]
pub use self::time::*;

use crate::choice::ChoiceType;
use crate::value::Value;
use std::fmt::Debug;

/// Casts an external value into its internal representation.
///
/// Returns `None` if the value cannot be cast. Implementations must accept their own output, so
/// that casting an already cast value is a no-op.
pub trait Type: Debug + Send + Sync {
    fn cast(&self, value: &Value) -> Option<Value>;

    /// The external form of a cast value, the inverse of [`Type::cast`].
    fn serialize(&self, value: &Value) -> String {
        value.to_string()
    }

    fn choices(&self) -> Option<&ChoiceType> {
        None
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Text;

impl Type for Text {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Text(_) => Some(value.clone()),
            Value::Order(_) => None,
            value => Some(Value::Text(value.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Integer;

impl Type for Integer {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Integer(_) => Some(value.clone()),
            Value::Bool(value) => Some(Value::Integer(i64::from(*value))),
            Value::Float(value) => truncate(*value),
            Value::Text(value) => {
                let value = value.trim();
                match value.parse::<i64>() {
                    Ok(value) => Some(Value::Integer(value)),
                    Err(_) => truncate(value.parse::<f64>().ok()?),
                }
            }
            _ => None,
        }
    }
}

fn truncate(value: f64) -> Option<Value> {
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Some(Value::Integer(value.trunc() as i64))
    } else {
        None
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Float;

impl Type for Float {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Float(_) => Some(value.clone()),
            Value::Integer(value) => Some(Value::Float(*value as f64)),
            Value::Text(value) => value.trim().parse::<f64>().ok().map(Value::Float),
            _ => None,
        }
    }
}

const FALSE_TOKENS: [&str; 4] = ["0", "f", "false", "off"];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Boolean;

impl Type for Boolean {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Bool(_) => Some(value.clone()),
            Value::Integer(value) => Some(Value::Bool(*value != 0)),
            Value::Float(value) => Some(Value::Bool(*value != 0.0)),
            Value::Text(value) => {
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                Some(Value::Bool(
                    !FALSE_TOKENS
                        .iter()
                        .any(|token| token.eq_ignore_ascii_case(value)),
                ))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_text() {
        assert_eq!(Some(Value::from("abc")), Text.cast(&"abc".into()));
        assert_eq!(Some(Value::from("")), Text.cast(&"".into()));
        assert_eq!(Some(Value::from("42")), Text.cast(&42i64.into()));
    }

    #[test]
    fn test_integer() {
        assert_eq!(Some(Value::Integer(123)), Integer.cast(&"123".into()));
        assert_eq!(Some(Value::Integer(-5)), Integer.cast(&" -5 ".into()));
        assert_eq!(Some(Value::Integer(1)), Integer.cast(&"1.9".into()));
        assert_eq!(Some(Value::Integer(7)), Integer.cast(&7i64.into()));
        assert_eq!(None, Integer.cast(&"".into()));
        assert_eq!(None, Integer.cast(&"BAD".into()));
        assert_eq!(None, Integer.cast(&f64::NAN.into()));
    }

    #[test]
    fn test_float() {
        assert_eq!(Some(Value::Float(1.5)), Float.cast(&"1.5".into()));
        assert_eq!(Some(Value::Float(2.0)), Float.cast(&2i64.into()));
        assert_eq!(None, Float.cast(&"x".into()));
    }

    #[test]
    fn test_boolean() {
        for truthy in [
            Value::from(true),
            "true".into(),
            1i64.into(),
            "1".into(),
            "on".into(),
        ] {
            assert_eq!(Some(Value::Bool(true)), Boolean.cast(&truthy), "{truthy:?}");
        }
        for falsey in [
            Value::from(false),
            "false".into(),
            0i64.into(),
            "0".into(),
            "OFF".into(),
            "F".into(),
        ] {
            assert_eq!(Some(Value::Bool(false)), Boolean.cast(&falsey), "{falsey:?}");
        }
        assert_eq!(None, Boolean.cast(&"".into()));
    }

    #[test]
    fn test_cast_is_idempotent() {
        let types: [&dyn Type; 4] = [&Text, &Integer, &Float, &Boolean];
        for ty in types {
            for input in [Value::from("12"), Value::from("true")] {
                if let Some(cast) = ty.cast(&input) {
                    assert_eq!(Some(cast.clone()), ty.cast(&cast), "{ty:?}");
                }
            }
        }
    }
}
