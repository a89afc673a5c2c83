//! Error types for the StageLink API client

use thiserror::Error;

/// Errors that can occur when talking to the backend or the media host
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ParseFailed(String),

    /// Unauthorized - missing or invalid bearer token
    #[error("Unauthorized - missing or invalid bearer token")]
    Unauthorized,

    /// No bearer token in the session for an authenticated route
    #[error("No bearer token in the session for an authenticated route")]
    MissingToken,

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// File exceeds the upload size limit
    #[error("File exceeds the {limit_bytes} byte upload limit ({actual_bytes} bytes)")]
    FileTooLarge {
        /// Maximum allowed size in bytes
        limit_bytes: usize,
        /// Size of the rejected file in bytes
        actual_bytes: usize,
    },
}
