use crate::attribute::{Attribute, AttributeDefinition, AttributeSet};
use crate::criteria::Criteria;
use crate::error::Error;
use crate::missing::{FieldType, OrMissing};
use crate::order::{Direction, OrderDefinition, OrderType};
use crate::params::QueryParams;
use crate::query::Queryable;
use crate::value::{Field, Value};
use once_cell::sync::OnceCell;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub const DEFAULT_PARAM_KEY: &str = "q";
pub const DEFAULT_ORDER_ATTRIBUTE: &str = "order";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// Wraps attribute names in query strings: `q[name]=value`.
    pub param_key: String,
    /// Name of the attribute holding the order choice.
    pub order_attribute: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            param_key: DEFAULT_PARAM_KEY.to_string(),
            order_attribute: DEFAULT_ORDER_ATTRIBUTE.to_string(),
        }
    }
}

type Model<Q> = Arc<dyn Fn() -> Q + Send + Sync>;

/// Declares the criteria and orders of a search.
///
/// A builder created by [`Specification::extend`] starts with a copy of the parent's
/// declarations. Neither side sees what the other declares afterwards.
pub struct Builder<Q> {
    model: Model<Q>,
    options: Options,
    scopes: Vec<Criteria<Q>>,
    criteria: Vec<Criteria<Q>>,
    orders: OrderType,
    default_order: Option<(String, Direction)>,
}

impl<Q> Builder<Q>
where
    Q: Queryable + 'static,
{
    pub fn new<F>(model: F) -> Self
    where
        F: Fn() -> Q + Send + Sync + 'static,
    {
        Self {
            model: Arc::new(model),
            options: Default::default(),
            scopes: vec![],
            criteria: vec![],
            orders: OrderType::new(),
            default_order: None,
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn criteria(mut self, criteria: Criteria<Q>) -> Self {
        self.criteria.push(criteria);
        self
    }

    /// Transform applied to every search, before any criteria.
    pub fn default_scope<F>(mut self, scope: F) -> Self
    where
        F: Fn(Q) -> Q + Send + Sync + 'static,
    {
        self.scopes.push(Criteria::scope(scope));
        self
    }

    /// Add an order. Fails for a name which is already declared.
    pub fn order(mut self, definition: OrderDefinition) -> Result<Self, Error> {
        self.orders.add_definition(definition)?;
        Ok(self)
    }

    /// The order used when the search doesn't specify one.
    pub fn default_order(mut self, name: impl Into<String>, direction: Direction) -> Self {
        self.default_order = Some((name.into(), direction));
        self
    }

    pub fn build(self) -> Result<Arc<Specification<Q>>, Error> {
        let mut attributes: Vec<AttributeDefinition> = vec![];
        let mut push = |definition: AttributeDefinition| {
            if attributes.iter().any(|a| a.name() == definition.name()) {
                return Err(Error::DuplicateAttribute(definition.name().to_string()));
            }
            attributes.push(definition);
            Ok(())
        };

        for criteria in &self.criteria {
            for definition in criteria.definitions() {
                push(definition)?;
            }
        }

        let default_order = match &self.default_order {
            Some((name, direction)) => {
                let definition = self
                    .orders
                    .definition(name)
                    .ok_or_else(|| Error::UnknownOrder(name.clone()))?;
                Some(Field::from(definition.choice_for_direction(*direction)))
            }
            None => None,
        };

        let order = match self.orders.is_empty() {
            true => None,
            false => {
                let order_type = Arc::new(OrMissing::new(self.orders));
                let mut criteria = Criteria::new(self.options.order_attribute.as_str())
                    .field_type(order_type.clone())
                    .transform(|query: Q, values| match values.first().and_then(Field::as_order) {
                        Some(order) => query.order_by_expression(order),
                        None => query,
                    });
                if let Some(default) = default_order {
                    criteria = criteria.default(default);
                }
                for definition in criteria.definitions() {
                    push(definition)?;
                }
                Some((order_type, criteria))
            }
        };

        Ok(Arc::new(Specification {
            model: self.model,
            options: self.options,
            scopes: self.scopes,
            criteria: self.criteria,
            order,
            attributes,
            default_order: self.default_order,
        }))
    }
}

/// The declared criteria and orders of a search, shared by all of its instances.
pub struct Specification<Q> {
    model: Model<Q>,
    options: Options,
    scopes: Vec<Criteria<Q>>,
    criteria: Vec<Criteria<Q>>,
    order: Option<(Arc<OrMissing<OrderType>>, Criteria<Q>)>,
    attributes: Vec<AttributeDefinition>,
    default_order: Option<(String, Direction)>,
}

impl<Q> Debug for Specification<Q> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Specification")
            .field("options", &self.options)
            .field("scopes", &self.scopes.len())
            .field("criteria", &self.criteria)
            .field("order", &self.order.as_ref().map(|(order, _)| order))
            .finish()
    }
}

impl<Q> Specification<Q>
where
    Q: Queryable + 'static,
{
    /// Start declaring a search over the queries produced by `model`.
    pub fn builder<F>(model: F) -> Builder<Q>
    where
        F: Fn() -> Q + Send + Sync + 'static,
    {
        Builder::new(model)
    }

    /// Start declaring a search based on this one.
    pub fn extend(&self) -> Builder<Q> {
        Builder {
            model: self.model.clone(),
            options: self.options.clone(),
            scopes: self.scopes.clone(),
            criteria: self.criteria.clone(),
            orders: self.order_type().cloned().unwrap_or_default(),
            default_order: self.default_order.clone(),
        }
    }

    /// Create a search, casting each input value through its attribute's type.
    ///
    /// Fails for names which aren't declared. Values which fail to cast don't fail the search,
    /// only their criteria will be skipped.
    pub fn search<I, K, V>(self: &Arc<Self>, input: I) -> Result<Search<Q>, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Field>,
    {
        let mut values: Vec<(String, Field)> = vec![];
        for (name, value) in input {
            let name = name.into();
            self.check_attribute(&name)?;
            insert(&mut values, name, value.into());
        }

        let attributes = self
            .attributes
            .iter()
            .map(|definition| {
                let input = values
                    .iter()
                    .position(|(name, _)| name == definition.name())
                    .map(|index| values.swap_remove(index).1);
                definition.instantiate(input)
            })
            .collect();

        Ok(Search {
            specification: self.clone(),
            attributes,
            order_directions: OnceCell::new(),
        })
    }

    /// Create a search from a URL query string, like `q[title]=foo&q[order]=title.desc`.
    ///
    /// Keys outside of [`Options::param_key`] are ignored. Unlike [`Self::search`], names which
    /// aren't declared are dropped too, so that links to a search outlive its attributes.
    pub fn search_query(self: &Arc<Self>, query: &str) -> Result<Search<Q>, Error> {
        let params = QueryParams::parse(&self.options.param_key, query)
            .into_iter()
            .filter(|(name, _)| match self.attribute(name) {
                Some(_) => true,
                None => {
                    log::debug!("Ignoring unknown attribute '{name}'");
                    false
                }
            });
        self.search(params)
    }

    /// A search without any input.
    pub fn new_search(self: &Arc<Self>) -> Search<Q> {
        let attributes = self
            .attributes
            .iter()
            .map(|definition| definition.instantiate(None))
            .collect();

        Search {
            specification: self.clone(),
            attributes,
            order_directions: OnceCell::new(),
        }
    }

    /// The base query, before applying any criteria.
    pub fn model(&self) -> Q {
        (self.model)()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes.iter()
    }

    pub fn criteria(&self) -> impl Iterator<Item = &Criteria<Q>> {
        self.criteria.iter()
    }

    pub fn order_type(&self) -> Option<&OrderType> {
        self.order.as_ref().map(|(order, _)| order.underlying())
    }

    fn check_attribute(&self, name: &str) -> Result<&AttributeDefinition, Error> {
        self.attribute(name)
            .ok_or_else(|| Error::UnknownAttribute(name.to_string()))
    }
}

fn insert(values: &mut Vec<(String, Field)>, name: String, value: Field) {
    match values.iter_mut().find(|(n, _)| *n == name) {
        Some((_, existing)) => *existing = value,
        None => values.push((name, value)),
    }
}

/// One search request: the cast attribute values of a [`Specification`].
pub struct Search<Q> {
    specification: Arc<Specification<Q>>,
    attributes: AttributeSet,
    order_directions: OnceCell<Vec<(String, Option<Direction>)>>,
}

impl<Q> Clone for Search<Q> {
    fn clone(&self) -> Self {
        Self {
            specification: self.specification.clone(),
            attributes: self.attributes.clone(),
            order_directions: self.order_directions.clone(),
        }
    }
}

impl<Q> Debug for Search<Q> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Search")
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl<Q> PartialEq for Search<Q> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.specification, &other.specification)
            && self.attributes == other.attributes
    }
}

impl<Q> Search<Q>
where
    Q: Queryable + 'static,
{
    /// Apply the default scopes, then each applicable criteria in declaration order, then the
    /// order.
    pub fn results(&self, base: Q) -> Q {
        let specification = &self.specification;
        specification
            .scopes
            .iter()
            .chain(&specification.criteria)
            .chain(specification.order.as_ref().map(|(_, criteria)| criteria))
            .fold(base, |query, criteria| {
                criteria.apply(query, &self.attributes)
            })
    }

    /// Results based on the specification's model.
    pub fn query(&self) -> Q {
        self.results(self.specification.model())
    }

    pub fn specification(&self) -> &Arc<Specification<Q>> {
        &self.specification
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// The cast value of an attribute.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.attributes.get(name).map(Attribute::value)
    }

    pub fn before_type_cast(&self, name: &str) -> Option<&Field> {
        self.attributes.get(name).map(Attribute::before_type_cast)
    }

    /// The supplied input, without defaults.
    fn input(&self) -> Vec<(String, Field)> {
        self.attributes
            .iter()
            .filter(|attribute| attribute.came_from_user())
            .map(|attribute| {
                (
                    attribute.name().to_string(),
                    attribute.before_type_cast().clone(),
                )
            })
            .collect()
    }

    /// A new search with the given values replacing the current ones.
    pub fn with<I, K, V>(&self, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Field>,
    {
        let mut input = self.input();
        for (name, value) in values {
            let name = name.into();
            self.specification.check_attribute(&name)?;
            insert(&mut input, name, value.into());
        }
        self.specification.search(input)
    }

    /// A new search without the given values, which fall back to their defaults.
    pub fn without<I, K>(&self, names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut input = self.input();
        for name in names {
            let name = name.as_ref();
            self.specification.check_attribute(name)?;
            input.retain(|(n, _)| n != name);
        }
        self.specification.search(input)
    }

    fn order_type(&self, name: &str) -> Result<&OrderType, Error> {
        self.specification
            .order_type()
            .ok_or_else(|| Error::UnknownOrder(name.to_string()))
    }

    /// A new search ordered by `name`.
    ///
    /// Without a direction, the current direction of that order is reversed. If the search isn't
    /// currently ordered by `name`, it will be ascending.
    pub fn toggle_order(&self, name: &str, direction: Option<Direction>) -> Result<Self, Error> {
        let definition = self
            .order_type(name)?
            .definition(name)
            .ok_or_else(|| Error::UnknownOrder(name.to_string()))?;

        let direction = direction.unwrap_or_else(|| match self.order_direction(name) {
            Some(direction) => direction.opposite(),
            None => Direction::Ascending,
        });

        let choice = definition.choice_for_direction(direction);
        self.with([(
            self.specification.options.order_attribute.as_str(),
            Field::from(choice),
        )])
    }

    /// The direction of each declared order, `None` for orders not applied.
    pub fn order_directions(&self) -> &[(String, Option<Direction>)] {
        self.order_directions.get_or_init(|| {
            let Some(order_type) = self.specification.order_type() else {
                return vec![];
            };

            let current = self
                .attributes
                .value(&self.specification.options.order_attribute)
                .as_order()
                .and_then(|order| order_type.direction_of(order));

            order_type
                .definitions()
                .map(|definition| {
                    let direction = current
                        .filter(|(name, _)| *name == definition.name())
                        .map(|(_, direction)| direction);
                    (definition.name().to_string(), direction)
                })
                .collect()
        })
    }

    pub fn order_direction(&self, name: &str) -> Option<Direction> {
        self.order_directions()
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, direction)| *direction)
    }

    fn field_type(&self, name: &str) -> Result<&dyn FieldType, Error> {
        Ok(self.specification.check_attribute(name)?.field_type())
    }

    /// The choice tokens of an attribute, in declaration order.
    pub fn choices_for(&self, name: &str) -> Result<Vec<&str>, Error> {
        let choices = self
            .field_type(name)?
            .choices()
            .ok_or_else(|| Error::NotChoiceAttribute(name.to_string()))?;
        Ok(choices.tokens().collect())
    }

    /// The choice tokens of an attribute, each with a flag if it is the current choice.
    pub fn each_choice(&self, name: &str) -> Result<Vec<(&str, bool)>, Error> {
        let selected = self.selected_choice(name);
        Ok(self
            .choices_for(name)?
            .into_iter()
            .map(|token| (token, Some(token) == selected))
            .collect())
    }

    /// The token of the current choice: the one supplied, or the first declared for the value.
    fn selected_choice(&self, name: &str) -> Option<&str> {
        let choices = self.field_type(name).ok()?.choices()?;
        let attribute = self.attributes.get(name)?;
        let value = attribute.value().value()?;

        match attribute.before_type_cast() {
            Field::Value(Value::Text(token)) if choices.is_token_for(token, value) => {
                Some(token.as_str())
            }
            _ => choices.token_for(value),
        }
    }

    /// The external form of all attributes which differ from their defaults.
    pub fn to_query_params(&self) -> QueryParams {
        let mut result = QueryParams::new();

        for attribute in self.attributes.iter().filter(|a| a.changed()) {
            let value = match (attribute.before_type_cast(), attribute.value()) {
                (_, Field::Missing) => continue,
                (_, Field::Null) | (Field::Null, _) => None,
                (Field::Value(Value::Text(raw)), _) => Some(raw.clone()),
                (_, Field::Value(value)) => match self.field_type(attribute.name()) {
                    Ok(field_type) => Some(field_type.serialize(value)),
                    Err(_) => continue,
                },
            };
            result.push(attribute.name(), value);
        }

        result
    }

    /// The query string of [`Self::to_query_params`], wrapped in the param key.
    pub fn to_query_string(&self) -> String {
        self.to_query_params()
            .to_query_string(&self.specification.options.param_key)
    }
}
