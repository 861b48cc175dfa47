use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// Always fatal: raised before any network call is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors while fetching the subscription list. Fatal for the run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("subscription request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("subscription request returned HTTP {status}")]
    Status { status: u16 },

    #[error("failed to decode subscription response: {0}")]
    Decode(String),

    #[error("vendor API error (code {code}): {msg}")]
    Api { code: i64, msg: String },
}

/// Per-subscription reset failure.
///
/// Recorded into the run statistics; never aborts the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResetError {
    #[error("reset request failed: {0}")]
    Transport(String),

    #[error("reset rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("reset worker aborted: {0}")]
    Worker(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
