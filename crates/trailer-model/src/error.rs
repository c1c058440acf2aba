use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid case identifier '{0}': expected a one-character prefix followed by digits")]
    InvalidCaseId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
