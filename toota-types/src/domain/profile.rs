//! Settings profile selection.

use serde::Serialize;

use crate::error::ConfigError;

/// Named settings layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Base settings, used for local development.
    #[default]
    Development,
    /// Base settings plus the hosted-environment overrides.
    Production,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "base" | "toota.settings" => Ok(Profile::Development),
            "production" | "prod" | "toota.settings.production" => Ok(Profile::Production),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("prod".parse::<Profile>().unwrap(), Profile::Production);
        assert_eq!(
            "toota.settings.production".parse::<Profile>().unwrap(),
            Profile::Production
        );
        assert_eq!(" Base ".parse::<Profile>().unwrap(), Profile::Development);
        assert_eq!("toota.settings".parse::<Profile>().unwrap(), Profile::Development);
    }

    #[test]
    fn test_unknown_profile_fails() {
        let result = "staging".parse::<Profile>();
        assert_eq!(result, Err(ConfigError::UnknownProfile("staging".into())));
    }

    #[test]
    fn test_default_is_development() {
        assert_eq!(Profile::default(), Profile::Development);
    }
}
