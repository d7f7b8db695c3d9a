use crate::error::Error;
use crate::types::Type;
use crate::value::Value;

/// A closed set of choice tokens, each mapped to a value.
///
/// Several tokens may map to the same value (aliases). Casting accepts either a token or one of
/// the mapped values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChoiceType {
    choices: Vec<(String, Value)>,
}

impl ChoiceType {
    /// Create from token/value pairs, in declaration order.
    pub fn new<I, K, V>(choices: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut result = Self::default();
        for (token, value) in choices {
            result.insert(token.into(), value.into())?;
        }
        result.validate()?;
        Ok(result)
    }

    /// Create from a list of values, each value's string form becoming its token.
    pub fn from_values<I, V>(values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(values.into_iter().map(|value| {
            let value = value.into();
            (value.to_string(), value)
        }))
    }

    /// Insert a token, failing if it already maps to a different value.
    pub(crate) fn insert(&mut self, token: String, value: Value) -> Result<(), Error> {
        match self.lookup(&token) {
            Some(existing) if *existing == value => Ok(()),
            Some(_) => Err(Error::ConflictingChoice(token)),
            None => {
                self.choices.push((token, value));
                Ok(())
            }
        }
    }

    /// Insert or replace a token.
    pub(crate) fn set(&mut self, token: String, value: Value) {
        match self.choices.iter_mut().find(|(t, _)| *t == token) {
            Some((_, existing)) => *existing = value,
            None => self.choices.push((token, value)),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        for (_, value) in &self.choices {
            if let Value::Text(text) = value {
                match self.lookup(text) {
                    Some(other) if other != value => {
                        return Err(Error::ValueIsAlsoToken(text.clone()))
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn lookup(&self, token: &str) -> Option<&Value> {
        self.choices
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, value)| value)
    }

    /// Cast a token to its value, or accept one of the values as-is.
    pub fn cast(&self, value: &Value) -> Option<Value> {
        if let Value::Text(token) = value {
            if let Some(value) = self.lookup(token) {
                return Some(value.clone());
            }
        }

        self.choices
            .iter()
            .find(|(_, v)| v == value)
            .map(|(_, v)| v.clone())
    }

    /// The token/value mapping, in declaration order.
    pub fn mapping(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.choices
            .iter()
            .map(|(token, value)| (token.as_str(), value))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|(token, _)| token.as_str())
    }

    /// The first declared token mapping to the value.
    pub fn token_for(&self, value: &Value) -> Option<&str> {
        self.choices
            .iter()
            .find(|(_, v)| v == value)
            .map(|(token, _)| token.as_str())
    }

    /// Check if the token is declared and maps to the value.
    pub fn is_token_for(&self, token: &str, value: &Value) -> bool {
        self.lookup(token) == Some(value)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl Type for ChoiceType {
    fn cast(&self, value: &Value) -> Option<Value> {
        ChoiceType::cast(self, value)
    }

    fn serialize(&self, value: &Value) -> String {
        match self.token_for(value) {
            Some(token) => token.to_string(),
            None => value.to_string(),
        }
    }

    fn choices(&self) -> Option<&ChoiceType> {
        Some(self)
    }
}

/// A type providing its own set of choices, see the `Choices` derive.
pub trait Choices {
    fn choice_type() -> Result<ChoiceType, Error>;
}
