use crate::attribute::{AttributeDefinition, AttributeSet};
use crate::choice::ChoiceType;
use crate::missing::{FieldType, OrMissing, Void};
use crate::query::Queryable;
use crate::types::{Text, Type};
use crate::value::{Field, Value};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Transforms the query, given the cast values of a criteria's attributes, in declaration order.
///
/// Returning the query unchanged skips the criteria.
pub type Transform<Q> = Arc<dyn Fn(Q, &[Field]) -> Q + Send + Sync>;

/// The attribute names of a criteria.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Names(pub Vec<String>);

impl From<&str> for Names {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for Names {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&[&str]> for Names {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(value: [&str; N]) -> Self {
        Self(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for Names {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

/// A named predicate over one or more attributes.
///
/// Without a transform, an applicable criteria filters by equality on all of its attributes.
pub struct Criteria<Q> {
    names: Vec<String>,
    field_type: Arc<dyn FieldType>,
    default: Option<Field>,
    transform: Option<Transform<Q>>,
}

impl<Q> Clone for Criteria<Q> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            field_type: self.field_type.clone(),
            default: self.default.clone(),
            transform: self.transform.clone(),
        }
    }
}

impl<Q> Debug for Criteria<Q> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criteria")
            .field("names", &self.names)
            .field("field_type", &self.field_type)
            .field("default", &self.default)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl<Q> Criteria<Q> {
    /// Criteria on text attributes.
    pub fn new(names: impl Into<Names>) -> Self {
        Self {
            names: names.into().0,
            field_type: Arc::new(OrMissing::new(Text)),
            default: None,
            transform: None,
        }
    }

    /// Criteria which only applies if its attributes are truthy.
    pub fn void(names: impl Into<Names>) -> Self {
        Self::new(names).field_type(Void)
    }

    /// Criteria without attributes, which always applies.
    pub(crate) fn scope<F>(transform: F) -> Self
    where
        F: Fn(Q) -> Q + Send + Sync + 'static,
    {
        Self::new(Names::default()).transform(move |query, _| transform(query))
    }

    /// Cast attributes with the given type, failed casts become missing.
    pub fn of<T>(self, ty: T) -> Self
    where
        T: Type + 'static,
    {
        self.field_type(OrMissing::new(ty))
    }

    pub fn choices(self, choices: ChoiceType) -> Self {
        self.of(choices)
    }

    pub fn field_type<T>(mut self, field_type: T) -> Self
    where
        T: FieldType + 'static,
    {
        self.field_type = Arc::new(field_type);
        self
    }

    /// Value used when the attribute was not supplied, or failed to cast.
    pub fn default(mut self, default: impl Into<Field>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Q, &[Field]) -> Q + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn defaultable(&self) -> bool {
        matches!(&self.default, Some(default) if !default.is_missing())
    }

    pub fn definitions(&self) -> impl Iterator<Item = AttributeDefinition> + '_ {
        self.names.iter().map(|name| {
            AttributeDefinition::new(name.clone(), self.field_type.clone(), self.default.clone())
        })
    }

    /// Check if all attributes were supplied, or defaulted, and cast successfully.
    pub fn applicable(&self, attributes: &AttributeSet) -> bool {
        let void = self.field_type.is_void();
        self.names.iter().all(|name| match attributes.get(name) {
            Some(attribute) => {
                (attribute.came_from_user() || self.defaultable())
                    && match attribute.value() {
                        Field::Missing => false,
                        Field::Null => !void,
                        Field::Value(value) => !void || value == &Value::Bool(true),
                    }
            }
            None => false,
        })
    }

    pub fn apply(&self, query: Q, attributes: &AttributeSet) -> Q
    where
        Q: Queryable,
    {
        if !self.applicable(attributes) {
            log::trace!("Skipping criteria {:?}", self.names);
            return query;
        }

        log::trace!("Applying criteria {:?}", self.names);

        let values = self
            .names
            .iter()
            .map(|name| attributes.value(name).clone())
            .collect::<Vec<_>>();

        match &self.transform {
            Some(transform) => transform(query, &values),
            None if self.names.is_empty() => query,
            None => {
                let conditions = self
                    .names
                    .iter()
                    .zip(&values)
                    .map(|(name, value)| (name.as_str(), value.value()))
                    .collect::<Vec<_>>();
                query.filter_equal(&conditions)
            }
        }
    }
}
