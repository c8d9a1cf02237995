use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unknown animal type: {0}")]
    UnknownAnimalType(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
