//! Error types for formwork

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the form controller
///
/// Failed validation is not an error: it is recorded in the errors store.
#[derive(Error, Debug)]
pub enum FormError {
    /// An event or snapshot named a field the schema does not declare
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The caller-supplied submit handler failed
    #[error("Submit handler failed: {0}")]
    SubmitHandler(anyhow::Error),
}

impl From<anyhow::Error> for FormError {
    fn from(err: anyhow::Error) -> Self {
        FormError::SubmitHandler(err)
    }
}

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised while loading a declarative form definition
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the definition file
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition is not valid TOML or has the wrong shape
    #[error("Failed to parse form definition: {0}")]
    Parse(#[from] toml::de::Error),

    /// The definition declares no fields
    #[error("Form definition declares no fields")]
    Empty,
}
