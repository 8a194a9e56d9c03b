//! Resolved settings.
//!
//! A `Settings` value is built once at startup by the resolver and never
//! mutated afterwards. Adapters read it behind an `Arc`.

use std::path::PathBuf;

use serde::Serialize;

use super::{AllowedHosts, ConnectionParams, CsrfTrustedOrigins, Profile, SecretKey};
use crate::error::ConfigError;

/// Database backend. Only Postgres is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    #[default]
    Postgresql,
}

/// `sslmode` values understood by libpq-style connection strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Allow => "allow",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl std::str::FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "allow" => Ok(SslMode::Allow),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            _ => Err(ConfigError::InvalidValue {
                key: "sslmode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseSettings {
    pub engine: DatabaseEngine,
    pub name: String,
    pub host: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: SecretKey,
    pub port: u16,
    /// `sslmode` from the connection string, if given.
    pub ssl_mode: Option<SslMode>,
}

impl DatabaseSettings {
    /// Builds database settings from parsed connection string parameters.
    pub fn from_params(params: &ConnectionParams) -> Result<Self, ConfigError> {
        let port = params
            .port()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort {
                value: params.port().to_string(),
            })?;
        let ssl_mode = params
            .get("sslmode")
            .map(str::parse::<SslMode>)
            .transpose()?;

        Ok(Self {
            engine: DatabaseEngine::Postgresql,
            name: params.dbname().to_string(),
            host: params.host().to_string(),
            user: params.user().to_string(),
            password: SecretKey::new(params.password()),
            port,
            ssl_mode,
        })
    }

    /// Parses a connection string straight into database settings.
    pub fn from_connection_string(conn_str: &str) -> Result<Self, ConfigError> {
        Self::from_params(&ConnectionParams::parse(conn_str)?)
    }
}

/// Request pipeline stages, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Middleware {
    Security,
    StaticFiles,
    Sessions,
    Common,
    Csrf,
    Authentication,
    Messages,
    Clickjacking,
}

impl Middleware {
    /// The hosted pipeline, in order.
    pub const PRODUCTION: [Middleware; 8] = [
        Middleware::Security,
        Middleware::StaticFiles,
        Middleware::Sessions,
        Middleware::Common,
        Middleware::Csrf,
        Middleware::Authentication,
        Middleware::Messages,
        Middleware::Clickjacking,
    ];

    /// Local pipeline: static files are served by the dev server directly.
    pub const DEVELOPMENT: [Middleware; 7] = [
        Middleware::Security,
        Middleware::Sessions,
        Middleware::Common,
        Middleware::Csrf,
        Middleware::Authentication,
        Middleware::Messages,
        Middleware::Clickjacking,
    ];
}

/// Storage backend for collected static files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Files are served as they are on disk.
    #[default]
    FileSystem,
    /// Precompressed `.gz`/`.br` siblings are preferred, other responses are
    /// compressed on the fly.
    CompressedStatic,
}

/// The full settings for one process.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub profile: Profile,
    #[serde(skip_serializing)]
    pub secret_key: SecretKey,
    pub debug: bool,
    pub allowed_hosts: AllowedHosts,
    pub csrf_trusted_origins: CsrfTrustedOrigins,
    pub middleware: Vec<Middleware>,
    pub storages: StorageBackend,
    pub static_root: PathBuf,
    pub static_url: String,
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn has_middleware(&self, middleware: Middleware) -> bool {
        self.middleware.contains(&middleware)
    }
}
