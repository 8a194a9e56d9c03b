//! Error types for settings resolution.

/// Configuration errors. Every variant is fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Malformed connection string pair: {token:?} (expected key=value)")]
    MalformedConnectionPair { token: String },

    #[error("Connection string is missing required parameter: {0}")]
    MissingConnectionParam(&'static str),

    #[error("Invalid database port: {value:?}")]
    InvalidPort { value: String },

    #[error("Unknown settings profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Readiness probe failures (database unreachable, query failed).
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Probe timed out")]
    Timeout,
}
