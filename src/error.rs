use std::path::PathBuf;

use thiserror::Error;

use crate::llm::ProviderError;

/// Errors raised while generating a strategy
#[derive(Debug, Error)]
pub enum StrategistError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to parse JSON response: {message}")]
    Parse { message: String, raw: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read template {path:?}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StrategistError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StrategistError>;
