pub mod attribute;
pub mod choice;
pub mod criteria;
pub mod error;
pub mod missing;
pub mod order;
pub mod params;
pub mod parser;
pub mod query;
pub mod search;
pub mod types;
pub mod value;

#[cfg(feature = "sea-orm")]
pub mod sea_orm;

pub mod prelude {
    pub use crate::choice::{ChoiceType, Choices};
    pub use crate::criteria::Criteria;
    pub use crate::error::Error;
    pub use crate::missing::{FieldType, OrMissing, Void};
    pub use crate::order::{Column, Direction, OrderBy, OrderDefinition, OrderType};
    pub use crate::params::QueryParams;
    pub use crate::query::Queryable;
    pub use crate::search::{Builder, Options, Search, Specification};
    pub use crate::types::*;
    pub use crate::value::{Field, Value};
    pub use kriteria_macros::Choices;
}

pub use kriteria_macros::Choices;

pub use ::chumsky;
