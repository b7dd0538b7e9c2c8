//! Error types for sitecheck records

use thiserror::Error;

/// Result type alias using the record Error
pub type Result<T> = std::result::Result<T, Error>;

/// Record generation and validation errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    #[error("Invalid field {field}: {reason}")]
    Shape { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Shape {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Error::RandomSource(e.to_string())
    }
}
