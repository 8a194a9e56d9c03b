//! Entry point configuration from environment.

use toota_types::{ConfigError, EnvSource, Profile};

/// Names the settings profile to load. Set-if-unset: an explicit value wins.
pub const SETTINGS_MODULE_VAR: &str = "TOOTA_SETTINGS_MODULE";

const DEFAULT_PORT: &str = "8000";
const DEFAULT_HOST: &str = "0.0.0.0";

/// Process-level configuration (where to listen, which profile to load).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub profile: Profile,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// `profile_override` comes from the command line and beats the
    /// environment.
    pub fn from_env(
        env: &impl EnvSource,
        profile_override: Option<Profile>,
    ) -> Result<Self, ConfigError> {
        let profile = match profile_override {
            Some(profile) => profile,
            None => env
                .var(SETTINGS_MODULE_VAR)
                .map(|value| value.parse::<Profile>())
                .transpose()?
                .unwrap_or_default(),
        };

        let port_str = env.var_or("PORT", DEFAULT_PORT);
        let port = port_str.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "PORT".to_string(),
            value: port_str.clone(),
        })?;

        let host = env.var_or("HOST", DEFAULT_HOST);

        Ok(Self {
            profile,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
