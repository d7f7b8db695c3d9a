use crate::choice::ChoiceType;
use crate::types::{Boolean, Type};
use crate::value::{Field, Value};
use std::fmt::Debug;
use std::sync::Arc;

/// Casts raw attribute input into a [`Field`], keeping "never supplied" apart from null.
pub trait FieldType: Debug + Send + Sync {
    fn cast(&self, input: &Field) -> Field;

    fn serialize(&self, value: &Value) -> String;

    fn choices(&self) -> Option<&ChoiceType> {
        None
    }

    /// A void field only exists when truthy.
    fn is_void(&self) -> bool {
        false
    }
}

impl<T: FieldType + ?Sized> FieldType for Arc<T> {
    fn cast(&self, input: &Field) -> Field {
        self.as_ref().cast(input)
    }

    fn serialize(&self, value: &Value) -> String {
        self.as_ref().serialize(value)
    }

    fn choices(&self) -> Option<&ChoiceType> {
        self.as_ref().choices()
    }

    fn is_void(&self) -> bool {
        self.as_ref().is_void()
    }
}

/// Wraps a [`Type`], turning failed casts into [`Field::Missing`].
///
/// An explicit null stays null. Any other input the underlying type rejects, including blank
/// input for non-text types, becomes missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrMissing<T: Type> {
    underlying: T,
}

impl<T: Type> OrMissing<T> {
    pub fn new(underlying: T) -> Self {
        Self { underlying }
    }

    pub fn underlying(&self) -> &T {
        &self.underlying
    }
}

impl<T: Type> FieldType for OrMissing<T> {
    fn cast(&self, input: &Field) -> Field {
        match input {
            Field::Missing => Field::Missing,
            Field::Null => Field::Null,
            Field::Value(value) => match self.underlying.cast(value) {
                Some(value) => Field::Value(value),
                None => Field::Missing,
            },
        }
    }

    fn serialize(&self, value: &Value) -> String {
        self.underlying.serialize(value)
    }

    fn choices(&self) -> Option<&ChoiceType> {
        self.underlying.choices()
    }
}

/// A flag without an "explicit false": anything not truthy is missing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Void;

impl FieldType for Void {
    fn cast(&self, input: &Field) -> Field {
        match input {
            Field::Value(value) => match Boolean.cast(value) {
                Some(Value::Bool(true)) => Field::Value(Value::Bool(true)),
                _ => Field::Missing,
            },
            Field::Missing | Field::Null => Field::Missing,
        }
    }

    fn serialize(&self, value: &Value) -> String {
        value.to_string()
    }

    fn is_void(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Integer, Text};

    #[test]
    fn test_cast_with_valid_value() {
        let ty = OrMissing::new(Integer);
        assert_eq!(Field::from(42i64), ty.cast(&"42".into()));
        assert_eq!(Field::from(42i64), ty.cast(&42i64.into()));
    }

    #[test]
    fn test_cast_with_invalid_value() {
        let ty = OrMissing::new(Integer);
        assert_eq!(Field::Missing, ty.cast(&"BAD".into()));
        assert_eq!(Field::Missing, ty.cast(&"".into()));
    }

    #[test]
    fn test_cast_with_null() {
        assert_eq!(Field::Null, OrMissing::new(Integer).cast(&Field::Null));
        assert_eq!(Field::Null, OrMissing::new(Text).cast(&Field::Null));
    }

    #[test]
    fn test_cast_blank_text() {
        assert_eq!(Field::from(""), OrMissing::new(Text).cast(&"".into()));
    }

    #[test]
    fn test_cast_missing() {
        assert_eq!(Field::Missing, OrMissing::new(Text).cast(&Field::Missing));
    }

    #[test]
    fn test_void_truthy() {
        for truthy in [Field::from(true), "true".into(), 1i64.into(), "1".into()] {
            assert_eq!(Field::from(true), Void.cast(&truthy));
        }
    }

    #[test]
    fn test_void_falsey() {
        for falsey in [
            Field::from(false),
            "false".into(),
            0i64.into(),
            "0".into(),
            Field::Null,
            "".into(),
        ] {
            assert_eq!(Field::Missing, Void.cast(&falsey));
        }
        assert_eq!(Field::Missing, Void.cast(&Field::Missing));
    }
}
