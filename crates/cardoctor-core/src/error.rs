use thiserror::Error;

/// Application-wide error types for the booking API.
#[derive(Error, Debug)]
pub enum AppError {
    /// No session credential was presented.
    #[error("Unauthorized Access")]
    Unauthenticated,

    /// The session credential failed signature or expiry checks.
    #[error("Unauthorized Access")]
    InvalidToken(String),

    /// Authenticated, but asking for another identity's data.
    #[error("Forbidden Access")]
    Forbidden,

    /// A path id is not a valid document id.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Signing a session credential failed.
    #[error("Token error: {0}")]
    TokenError(String),

    /// A request body could not be turned into a stored document.
    #[error("Document error: {0}")]
    DocumentError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}
