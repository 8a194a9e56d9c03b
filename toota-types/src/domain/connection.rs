//! Space-delimited database connection string.
//!
//! The managed Postgres service exposes its credentials as a single
//! `key=value key=value ...` string. Values may contain `=`; only the first
//! `=` of each pair separates key from value.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

/// Port used when the connection string does not carry one.
pub const DEFAULT_PORT: &str = "5432";

/// Keys that must be present, in the order they are checked.
pub const REQUIRED_KEYS: [&str; 4] = ["dbname", "host", "user", "password"];

/// Parsed connection string parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    params: BTreeMap<String, String>,
}

impl ConnectionParams {
    /// Parses a connection string and checks the required keys.
    pub fn parse(conn_str: &str) -> Result<Self, ConfigError> {
        let mut params = BTreeMap::new();

        for token in conn_str.split_whitespace() {
            let (key, value) = token.split_once('=').ok_or_else(|| {
                ConfigError::MalformedConnectionPair {
                    token: redact_token(token),
                }
            })?;
            if key.is_empty() {
                return Err(ConfigError::MalformedConnectionPair {
                    token: redact_token(token),
                });
            }
            // Repeated keys: last one wins.
            params.insert(key.to_string(), value.to_string());
        }

        for key in REQUIRED_KEYS {
            if !params.contains_key(key) {
                return Err(ConfigError::MissingConnectionParam(key));
            }
        }

        Ok(Self { params })
    }

    /// Returns the raw value for any key, including unknown ones like `sslmode`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn dbname(&self) -> &str {
        self.required("dbname")
    }

    pub fn host(&self) -> &str {
        self.required("host")
    }

    pub fn user(&self) -> &str {
        self.required("user")
    }

    pub fn password(&self) -> &str {
        self.required("password")
    }

    /// Returns the port, falling back to [`DEFAULT_PORT`].
    pub fn port(&self) -> &str {
        self.get("port").unwrap_or(DEFAULT_PORT)
    }

    /// Returns the full mapping with the port default applied.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        let mut map = self.params.clone();
        map.entry("port".to_string())
            .or_insert_with(|| DEFAULT_PORT.to_string());
        map
    }

    fn required(&self, key: &str) -> &str {
        // Presence is checked in `parse`.
        self.get(key).unwrap_or_default()
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.params {
            if key == "password" {
                map.entry(key, &"********");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

/// Keeps error messages from echoing a password that lost its `=`.
fn redact_token(token: &str) -> String {
    if token.starts_with("password") {
        "password...".to_string()
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let params = ConnectionParams::parse(
            "dbname=toota host=db.example.com user=admin password=s3cret",
        )
        .unwrap();
        assert_eq!(params.dbname(), "toota");
        assert_eq!(params.host(), "db.example.com");
        assert_eq!(params.user(), "admin");
        assert_eq!(params.password(), "s3cret");
        assert_eq!(params.port(), "5432");
    }

    #[test]
    fn test_as_map_has_exactly_required_keys_and_default_port() {
        let params = ConnectionParams::parse("dbname=X host=Y user=Z password=W").unwrap();
        let map = params.as_map();

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["dbname", "host", "password", "port", "user"]);
        assert_eq!(map["dbname"], "X");
        assert_eq!(map["host"], "Y");
        assert_eq!(map["user"], "Z");
        assert_eq!(map["password"], "W");
        assert_eq!(map["port"], "5432");
    }

    #[test]
    fn test_explicit_port_wins() {
        let params =
            ConnectionParams::parse("dbname=a host=b user=c password=d port=6543").unwrap();
        assert_eq!(params.port(), "6543");
        assert_eq!(params.as_map()["port"], "6543");
    }

    #[test]
    fn test_value_keeps_everything_after_first_equals() {
        let params =
            ConnectionParams::parse("dbname=a host=b user=c password=abc=def==").unwrap();
        assert_eq!(params.password(), "abc=def==");
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let params =
            ConnectionParams::parse("dbname=a host=b user=c password=d sslmode=require").unwrap();
        assert_eq!(params.get("sslmode"), Some("require"));
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let params = ConnectionParams::parse("dbname=a host=b user=c password=d host=e").unwrap();
        assert_eq!(params.host(), "e");
    }

    #[test]
    fn test_extra_whitespace_is_skipped() {
        let params = ConnectionParams::parse("  dbname=a   host=b user=c\tpassword=d ").unwrap();
        assert_eq!(params.dbname(), "a");
        assert_eq!(params.password(), "d");
    }

    #[test]
    fn test_missing_required_key_fails() {
        let result = ConnectionParams::parse("dbname=a host=b user=c");
        assert_eq!(result, Err(ConfigError::MissingConnectionParam("password")));

        let result = ConnectionParams::parse("host=b user=c password=d");
        assert_eq!(result, Err(ConfigError::MissingConnectionParam("dbname")));
    }

    #[test]
    fn test_empty_string_reports_first_required_key() {
        let result = ConnectionParams::parse("");
        assert_eq!(result, Err(ConfigError::MissingConnectionParam("dbname")));
    }

    #[test]
    fn test_token_without_equals_is_malformed() {
        let result = ConnectionParams::parse("dbname=a host b user=c password=d");
        assert!(matches!(
            result,
            Err(ConfigError::MalformedConnectionPair { token }) if token == "host"
        ));
    }

    #[test]
    fn test_empty_key_is_malformed() {
        let result = ConnectionParams::parse("=a host=b user=c password=d dbname=e");
        assert!(matches!(
            result,
            Err(ConfigError::MalformedConnectionPair { .. })
        ));
    }

    #[test]
    fn test_malformed_password_token_is_redacted() {
        let result = ConnectionParams::parse("dbname=a host=b user=c passwordhunter2");
        assert!(matches!(
            result,
            Err(ConfigError::MalformedConnectionPair { token }) if !token.contains("hunter2")
        ));
    }

    #[test]
    fn test_debug_hides_password() {
        let params = ConnectionParams::parse("dbname=a host=b user=c password=hunter2").unwrap();
        let debug = format!("{:?}", params);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("dbname"));
    }
}
