//! Error types produced while shaping caller input into a [`FeatureVector`](crate::FeatureVector).
//!
//! All of these are caller-caused and recoverable: the request is rejected,
//! nothing downstream runs, and the next request is unaffected.

use thiserror::Error;

/// Shape or type violation in a feature payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// The payload did not carry exactly the expected number of values.
    #[error("expected {expected} feature values, got {got}")]
    WrongLength { expected: usize, got: usize },
    /// A value could not be read as a finite number.
    #[error("field '{field}' is not numeric: {value}")]
    NotNumeric { field: String, value: String },
    /// A named payload left out one of the fields.
    #[error("missing field '{0}'")]
    MissingField(String),
    /// A named payload carried a key that is not part of the schema.
    #[error("unknown field '{0}'")]
    UnknownField(String),
    /// The payload was neither an array of values nor an object of fields.
    #[error("expected an array of feature values or an object of named fields, got {0}")]
    NotARow(&'static str),
}

impl FeatureError {
    /// Field the error is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            FeatureError::NotNumeric { field, .. } => Some(field),
            FeatureError::MissingField(field) | FeatureError::UnknownField(field) => Some(field),
            FeatureError::WrongLength { .. } | FeatureError::NotARow(_) => None,
        }
    }
}
