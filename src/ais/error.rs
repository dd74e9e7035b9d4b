use thiserror::Error;

#[derive(Debug, Error)]
pub enum AisError {
    #[error("invalid vessel JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid vessel updateTimestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
