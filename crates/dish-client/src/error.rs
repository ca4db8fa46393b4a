use thiserror::Error;

/// Errors returned by [`crate::DishClient`] and the live-update stream.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed mid-body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server does not know the requested dish.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A response or pushed event did not match the expected JSON shape.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The live-update stream ended or was malformed.
    #[error("event stream error: {0}")]
    Stream(String),
}
