//! Error types for the translation side of the crate
//!
//! Highlighting itself never fails; these errors come from configuration,
//! input validation and the remote translation service.

use thiserror::Error;

/// Result type alias using TransbackError
pub type Result<T> = std::result::Result<T, TransbackError>;

#[derive(Debug, Error)]
pub enum TransbackError {
    #[error("OPENROUTER_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Missing required field: text")]
    EmptyInput,

    #[error("Input is {actual} characters long, the limit is {limit}")]
    InputTooLarge { actual: usize, limit: usize },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Translation API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Translation API returned no choices")]
    EmptyResponse,

    #[error("Event receiver closed before the round trip finished")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransbackError {
    /// Whether the error was caused by the submitted input rather than the service
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TransbackError::EmptyInput | TransbackError::InputTooLarge { .. }
        )
    }
}
