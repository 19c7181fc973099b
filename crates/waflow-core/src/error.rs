//! Error types for waflow-core

use thiserror::Error;

/// Request construction and dispatch error type
#[derive(Debug, Error)]
pub enum Error {
    /// Structural validation failure, detected before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or unusable credentials
    #[error("credentials error: {0}")]
    Credentials(String),

    /// Network/HTTP failure reported by the transport
    #[error("network error: {0}")]
    Network(String),

    /// Structured error returned by the WhatsApp Cloud API
    #[error("whatsapp api error {code}: {message}")]
    Api {
        /// Provider error code
        code: i64,
        /// Provider error message
        message: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
