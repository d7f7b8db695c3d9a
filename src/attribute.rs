use crate::missing::FieldType;
use crate::value::Field;
use std::sync::Arc;

/// A declared attribute: a name, how to cast it, and an optional default.
#[derive(Clone, Debug)]
pub struct AttributeDefinition {
    name: String,
    field_type: Arc<dyn FieldType>,
    default: Option<Field>,
}

impl AttributeDefinition {
    pub fn new(
        name: impl Into<String>,
        field_type: Arc<dyn FieldType>,
        default: Option<Field>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &dyn FieldType {
        self.field_type.as_ref()
    }

    pub fn default(&self) -> Option<&Field> {
        self.default.as_ref()
    }

    fn default_value(&self) -> Field {
        match &self.default {
            Some(default) => self.field_type.cast(default),
            None => Field::Missing,
        }
    }

    /// Cast the raw input, or the default if there is none.
    pub fn instantiate(&self, input: Option<Field>) -> Attribute {
        let default = self.default_value();

        let Some(before_type_cast) = input else {
            return Attribute {
                name: self.name.clone(),
                before_type_cast: self.default.clone().unwrap_or_default(),
                value: default,
                came_from_user: false,
                changed: false,
            };
        };

        let mut value = self.field_type.cast(&before_type_cast);
        if value.is_missing() {
            if !self.field_type.is_void() && !before_type_cast.is_missing() {
                log::debug!(
                    "Unable to cast attribute '{}' from {before_type_cast:?}, treating as missing",
                    self.name
                );
            }
            if self.default.is_some() {
                log::debug!("Falling back to default of attribute '{}'", self.name);
                value = default.clone();
            }
        }

        let changed = value != default;

        Attribute {
            name: self.name.clone(),
            before_type_cast,
            value,
            came_from_user: true,
            changed,
        }
    }
}

/// One attribute of a search, after casting.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    before_type_cast: Field,
    value: Field,
    came_from_user: bool,
    changed: bool,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn before_type_cast(&self) -> &Field {
        &self.before_type_cast
    }

    pub fn value(&self) -> &Field {
        &self.value
    }

    pub fn came_from_user(&self) -> bool {
        self.came_from_user
    }

    /// Whether the value differs from the default.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// The attributes of a search, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// The cast value of an attribute, missing if unknown.
    pub fn value(&self, name: &str) -> &Field {
        const MISSING: &Field = &Field::Missing;
        self.get(name).map(Attribute::value).unwrap_or(MISSING)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Self {
            attributes: Vec::from_iter(iter),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
