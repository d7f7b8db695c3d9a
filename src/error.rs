#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Multiple possible values for choice: {0}")]
    ConflictingChoice(String),
    #[error("Choice value is also a different choice: {0}")]
    ValueIsAlsoToken(String),
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
    #[error("Invalid order columns: {0}")]
    InvalidColumns(String),
    #[error("Unknown order: {0}")]
    UnknownOrder(String),
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("Duplicate attribute: {0}")]
    DuplicateAttribute(String),
    #[error("Duplicate order: {0}")]
    DuplicateOrder(String),
    #[error("Attribute has no choices: {0}")]
    NotChoiceAttribute(String),
}
