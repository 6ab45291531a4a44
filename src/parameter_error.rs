//! Error handling for the settings reader

use std::io;

/// Unified error to report failures while reading arm settings.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    #[error("IO Error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Missing Field: {0}")]
    MissingField(String),

    #[error("Wrong value of {field}: {reason}")]
    WrongValue { field: String, reason: String },

    #[error("Parameter Population Error: {0}")]
    ParameterPopulationError(String),
}

impl ParameterError {
    pub(crate) fn wrong(field: &str, reason: impl Into<String>) -> Self {
        ParameterError::WrongValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
