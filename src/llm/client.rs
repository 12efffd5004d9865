use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a completion provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to send request to {provider} API: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: {status} - {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {provider} API response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("No text content in {provider} response")]
    EmptyResponse { provider: &'static str },

    #[error("{0}")]
    Other(String),
}

/// Prompt-in, text-out access to a hosted language model.
///
/// Model and temperature are bound when the provider is constructed.
/// Implementations must be safe to call concurrently: the fan-out issues
/// several requests against the same provider at once.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Send a single user prompt and return the raw text completion
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
