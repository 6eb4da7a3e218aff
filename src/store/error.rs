use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email not found: {0}")]
    NotFound(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
