use thiserror::Error;

/// Application error types
///
/// Only failures that must reach the caller live here. Malformed input rows are
/// dropped by the loader, and errors reported by the index service itself are
/// carried as values on the response types (see [`crate::elastic::ServiceError`]).
#[derive(Error, Debug)]
pub enum AppError {
    /// Request to the index service timed out
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Could not connect to the index service
    #[error("Connection error: {0}")]
    Connection(String),

    /// Redirect limit exceeded
    #[error("Too many redirects: {0}")]
    TooManyRedirects(String),

    /// Any other request failure
    #[error("Request failed: {0}")]
    Request(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid caller input (bad region string, empty delimiter, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AppError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::TooManyRedirects(_) => "TOO_MANY_REDIRECTS",
            AppError::Request(_) => "REQUEST_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }

    /// True for failures of the HTTP round trip itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Timeout(_)
                | AppError::Connection(_)
                | AppError::TooManyRedirects(_)
                | AppError::Request(_)
        )
    }
}

/// Conversion from reqwest::Error, keeping the transport subtype
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_connect() {
            AppError::Connection(err.to_string())
        } else if err.is_redirect() {
            AppError::TooManyRedirects(err.to_string())
        } else {
            AppError::Request(err.to_string())
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
