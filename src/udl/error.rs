use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid UDL URL ({url}): {message}")]
    InvalidUrl { url: String, message: String },

    #[error("UDL request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unsuccessful status code returned {status}; response: {body}")]
    Status { status: u16, body: String },
}
