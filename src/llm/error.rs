use thiserror::Error;

/// Failures of a chat-completion call, as seen by the invoker and handlers.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Quota exhausted for the key used in this call. Retried with the next key.
    #[error("Rate limited (status {status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("LLM provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response from LLM provider: {0}")]
    InvalidResponse(String),

    /// Every key in the pool was tried and every attempt was rate limited.
    #[error("All API keys exhausted or rate limited ({attempts} attempts)")]
    KeysExhausted { attempts: usize },

    #[error("No API keys configured")]
    NoCredentials,
}

impl LlmError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }
}
