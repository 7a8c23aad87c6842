//! Configuration loading via `ortho-config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default base URL of the Vultr v1 API.
pub const DEFAULT_API_BASE: &str = "https://api.vultr.com/v1";

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Vultr specific configuration derived from environment variables,
/// configuration files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "VULTR",
    discovery(
        app_name = "vultr-ccm",
        env_var = "VULTR_CCM_CONFIG_PATH",
        config_file_name = "vultr-ccm.toml",
        dotfile_name = ".vultr-ccm.toml",
        project_file_name = "vultr-ccm.toml"
    )
)]
pub struct VultrConfig {
    /// API key sent with every request. This value is required.
    pub api_key: String,
    /// Base URL of the v1 API. Overridable for testing against a stub.
    #[ortho_config(default = DEFAULT_API_BASE.to_owned())]
    pub api_base: String,
    /// Timeout applied to every HTTP request.
    #[ortho_config(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }

    fn missing(&self) -> ConfigError {
        ConfigError::MissingField(format!(
            "missing {}: set {} or add {} to [vultr] in vultr-ccm.toml",
            self.description, self.env_var, self.toml_key
        ))
    }

    fn invalid(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidField(format!(
            "invalid {} ({reason}): check {} or {} in vultr-ccm.toml",
            self.description, self.env_var, self.toml_key
        ))
    }
}

const API_KEY_FIELD: FieldMetadata =
    FieldMetadata::new("Vultr API key", "VULTR_API_KEY", "api_key");
const API_BASE_FIELD: FieldMetadata =
    FieldMetadata::new("Vultr API base URL", "VULTR_API_BASE", "api_base");
const TIMEOUT_FIELD: FieldMetadata = FieldMetadata::new(
    "request timeout",
    "VULTR_REQUEST_TIMEOUT_SECS",
    "request_timeout_secs",
);

impl VultrConfig {
    /// Builds a configuration with defaults for everything but the API key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("vultr-ccm")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Timeout applied to each HTTP request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Performs semantic validation. Error messages include guidance on how
    /// to provide values via environment variables or configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty
    /// and [`ConfigError::InvalidField`] when a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(API_KEY_FIELD.missing());
        }

        let api_base = self.api_base.trim();
        if api_base.is_empty() {
            return Err(API_BASE_FIELD.missing());
        }
        let url = reqwest::Url::parse(api_base)
            .map_err(|err| API_BASE_FIELD.invalid(&err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(API_BASE_FIELD.invalid("scheme must be http or https"));
        }

        if self.request_timeout_secs == 0 {
            return Err(TIMEOUT_FIELD.invalid("must be greater than zero"));
        }
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a configuration value is present but unusable.
    #[error("invalid configuration field: {0}")]
    InvalidField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
