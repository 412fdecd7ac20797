//! Validation errors for configuration files.

use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    /// Every semantic problem found, in field order.
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl ValidationError {
    /// The individual problems, if this is a semantic failure.
    pub fn problems(&self) -> &[String] {
        match self {
            ValidationError::Invalid(problems) => problems,
            _ => &[],
        }
    }
}

impl From<ValidationError> for mab_common::Error {
    fn from(e: ValidationError) -> Self {
        mab_common::Error::Config(e.to_string())
    }
}
