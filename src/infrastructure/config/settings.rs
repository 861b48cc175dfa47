//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Settings come from an optional TOML file; the vendor bearer token is read
//! from the `TOKEN` environment variable and never from the file.
//!
//! # Example
//!
//! ```no_run
//! use creditreset::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("creditreset.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::reset::ResetConfig;
use crate::adapter::outbound::vendor::VendorConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the vendor bearer token.
pub const TOKEN_ENV: &str = "TOKEN";

/// Opaque bearer token. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a token as given, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The raw token, for request headers only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Log-safe rendering of the token.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_token(&self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", self.masked())
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Show the first 8 characters of a token followed by `****`.
///
/// Tokens of 8 characters or fewer are fully hidden.
#[must_use]
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 8 {
        return "****".to_string();
    }
    let prefix: String = token.chars().take(8).collect();
    format!("{prefix}****")
}

/// Main application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Vendor API endpoints and timeout.
    #[serde(default)]
    pub vendor: VendorConfig,

    /// Reset strategy tuning.
    #[serde(default)]
    pub reset: ResetConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Bearer token, populated from the environment after parsing.
    #[serde(skip)]
    pub token: Option<ApiToken>,
}

impl Config {
    /// Parse configuration from TOML content and read the token from the
    /// `TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - `TOKEN` is unset or blank
    /// - Validation fails (e.g., an unparseable endpoint URL)
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_with_token(content, std::env::var(TOKEN_ENV).ok())
    }

    /// Parse configuration from TOML content with an explicit token.
    ///
    /// # Errors
    ///
    /// Same as [`Config::parse_toml`].
    pub fn parse_with_token(content: &str, token: Option<String>) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.token = Some(
            token
                .and_then(ApiToken::new)
                .ok_or(ConfigError::MissingField { field: TOKEN_ENV })?,
        );

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when it exists, otherwise fall back to built-in
    /// defaults (the token is still required).
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// The validated bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the config was built without
    /// going through a parse method.
    pub fn token(&self) -> Result<&ApiToken> {
        self.token
            .as_ref()
            .ok_or_else(|| ConfigError::MissingField { field: TOKEN_ENV }.into())
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    fn validate(&self) -> Result<()> {
        validate_url("vendor.subscriptions_url", &self.vendor.subscriptions_url)?;
        validate_url("vendor.reset_url", &self.vendor.reset_url)?;

        if self.vendor.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "vendor.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let threshold = self.reset.usage_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "reset.usage_threshold",
                reason: format!("must be in (0, 1], got {threshold}"),
            }
            .into());
        }

        if self.reset.max_concurrency == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "reset.max_concurrency",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected \"pretty\" or \"json\", got \"{other}\""),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<()> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigError::InvalidValue {
            field,
            reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
        }
        .into()),
        Err(err) => Err(ConfigError::InvalidValue {
            field,
            reason: err.to_string(),
        }
        .into()),
    }
}
