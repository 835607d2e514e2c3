//! Error types for the proximity monitor
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains so a skipped tick
//! can be logged with its full cause.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for the proximity monitor
#[derive(Debug, Error)]
pub enum ProximityError {
    /// The HTTP request did not complete (endpoint unreachable, timeout, ...)
    #[error("Failed to fetch reading: {0}")]
    FetchFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The endpoint answered with a non-success status code
    #[error("Sensor endpoint returned HTTP status {0}")]
    HttpStatus(u16),

    /// The response body is not valid JSON
    #[error("Malformed sensor response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The JSON body has no numeric `distance` field
    #[error("Sensor response has no numeric `distance` field")]
    MissingDistance,

    /// The decoded distance is outside the physically meaningful range
    #[error("Invalid distance reading: {0}")]
    InvalidDistance(f64),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// GUI initialization or event loop error
    #[error("GUI error: {0}")]
    GuiError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ProximityError {
    /// Whether this error means a single poll was lost (as opposed to a
    /// configuration or environment problem)
    pub fn is_tick_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed(_)
                | Self::HttpStatus(_)
                | Self::MalformedResponse(_)
                | Self::MissingDistance
                | Self::InvalidDistance(_)
        )
    }
}

/// Result type alias for proximity monitor operations
pub type Result<T> = std::result::Result<T, ProximityError>;

/// Convert an error to a user-friendly message
///
/// Used for startup failures only; failed polls are never shown to the user.
pub fn get_user_friendly_error(error: &ProximityError) -> String {
    match error {
        ProximityError::FetchFailed(_) | ProximityError::HttpStatus(_) => {
            "Unable to reach the distance sensor.\n\n\
             Please ensure:\n\
             - The sensor is powered and connected to the network\n\
             - The configured endpoint address is correct"
                .to_string()
        }
        ProximityError::MalformedResponse(_)
        | ProximityError::MissingDistance
        | ProximityError::InvalidDistance(_) => "The sensor sent an unexpected response.\n\n\
             Check that the endpoint points at a distance sensor."
            .to_string(),
        ProximityError::ConfigError(e) => {
            format!(
                "Failed to load or save configuration:\n\n{e}\n\n\
                 Your settings may not persist."
            )
        }
        ProximityError::GuiError(e) => {
            format!(
                "Failed to open the status window:\n\n{e}\n\n\
                 Try running with --headless."
            )
        }
        ProximityError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        ProximityError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
