//! Error types for the DIME planner Lambda.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a DIME planner request.
#[derive(Error, Debug)]
pub enum Error {
    /// Request used a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Shared secret missing or mismatched
    #[error("Unauthorized")]
    Unauthorized,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// AI generation or advice validation failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MethodNotAllowed => 405,
            Error::Unauthorized => 401,
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Validation and generation details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::MethodNotAllowed => "Method not allowed".to_string(),
            Error::Unauthorized => "Unauthorized".to_string(),
            Error::Config(message) => message.clone(),
            Error::Validation(_) => "Invalid payload".to_string(),
            Error::Generation(_) => "AI generation failed".to_string(),
            Error::Aws(_) => "Internal error".to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.to_string())
    }
}
