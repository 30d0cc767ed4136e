//! Error types for endpoint fetches.

use thiserror::Error;

/// Errors that can occur while polling one endpoint.
///
/// All of these are logged and dropped by the poller; none of them reach
/// the view state.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Body(String),

    /// The JSON did not match the endpoint's contract.
    #[error("unexpected payload shape: {0}")]
    Shape(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Body(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
