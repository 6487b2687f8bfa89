//! Error types for the puzzle client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Unexpected HTTP status: {status}")]
    InvalidStatus { status: reqwest::StatusCode },

    #[error("Response body is not valid UTF-8")]
    Encoding,

    /// The session token cannot be sent as a cookie header
    #[error("Session token contains characters not allowed in a cookie")]
    SessionFormat,

    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
