//! Error types for the library layer.

use std::fmt;

use crate::config::ConfigError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding configuration and input validation failures.
#[derive(Debug)]
pub enum PaymentsError {
    /// An error from the underlying API client.
    Api(payments_api::Error),
    /// Configuration could not be loaded or was invalid.
    Config(ConfigError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl PaymentsError {
    /// True when the server answered 404 for an id lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api(e) if e.kind() == payments_api::ErrorKind::NotFound
        )
    }
}

impl fmt::Display for PaymentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for PaymentsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<payments_api::Error> for PaymentsError {
    fn from(e: payments_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ConfigError> for PaymentsError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
