//! Environment lookup port.

use crate::error::ConfigError;

/// Source of environment variables.
///
/// Implemented by the process environment in production and by in-memory
/// maps in tests.
pub trait EnvSource: Send + Sync {
    /// Returns the raw value of a variable, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns a required variable. Unset or blank values are errors.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        match self.var(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingVar(key.to_string())),
        }
    }

    /// Returns a variable or the given default.
    fn var_or(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.to_string())
    }
}
