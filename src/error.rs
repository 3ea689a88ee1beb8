use thiserror::Error;

/// Errors that can occur while talking to the recipe backend or setting up the explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Transport failure while calling the backend
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error {0}")]
    Status(u16),

    /// No recipe exists for the requested id
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Response body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Configured backend address could not be parsed
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
