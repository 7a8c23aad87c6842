//! Construction errors for the Vultr client.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while building a [`super::VultrClient`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum VultrClientError {
    /// Raised when the configuration fails validation.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when the HTTP client cannot be initialised.
    #[error("failed to build HTTP client: {message}")]
    HttpClient {
        /// Message returned by `reqwest`.
        message: String,
    },
}

impl From<ConfigError> for VultrClientError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<reqwest::Error> for VultrClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::HttpClient {
            message: value.to_string(),
        }
    }
}
