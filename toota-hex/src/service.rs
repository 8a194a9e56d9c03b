//! Settings Resolver
//!
//! Builds the process settings from the environment port.
//! Contains NO process access - everything comes through `EnvSource`.

use std::path::PathBuf;

use toota_types::{
    AllowedHosts, ConfigError, CsrfTrustedOrigins, DatabaseSettings, EnvSource, Middleware,
    Profile, SecretKey, Settings, StorageBackend,
};

pub const SECRET_KEY: &str = "SECRET_KEY";
pub const WEBSITE_HOSTNAME: &str = "WEBSITE_HOSTNAME";
pub const DATABASE_CONNECTION_STRING: &str = "AZURE_POSTGRESQL_CONNECTIONSTRING";
pub const ALLOWED_HOSTS: &str = "ALLOWED_HOSTS";
pub const CSRF_TRUSTED_ORIGINS: &str = "CSRF_TRUSTED_ORIGINS";
pub const BASE_DIR: &str = "BASE_DIR";

const DEV_SECRET_KEY: &str = "toota-insecure-development-only-key";
const DEV_ALLOWED_HOSTS: &str = "localhost,127.0.0.1,[::1]";
const DEV_CONNECTION_STRING: &str = "dbname=toota host=localhost user=postgres password=postgres";
const STATIC_DIR: &str = "staticfiles";
const STATIC_URL: &str = "/static/";

/// Resolves `Settings` for a profile.
///
/// Generic over `E: EnvSource` - the environment is injected, so resolution
/// is deterministic for a given set of variables.
pub struct SettingsResolver<E: EnvSource> {
    env: E,
}

impl<E: EnvSource> SettingsResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Resolves the settings for the given profile.
    pub fn resolve(&self, profile: Profile) -> Result<Settings, ConfigError> {
        let settings = match profile {
            Profile::Development => self.base()?,
            Profile::Production => self.production()?,
        };

        tracing::info!(
            profile = %settings.profile,
            debug = settings.debug,
            allowed_hosts = ?settings.allowed_hosts.as_slice(),
            database_host = %settings.database.host,
            database_name = %settings.database.name,
            "Settings resolved"
        );

        Ok(settings)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Profiles
    // ─────────────────────────────────────────────────────────────────────────────

    /// Base settings. Every value has a local default.
    pub fn base(&self) -> Result<Settings, ConfigError> {
        let secret_key = self.env.var_or(SECRET_KEY, DEV_SECRET_KEY);
        let allowed_hosts = self.env.var_or(ALLOWED_HOSTS, DEV_ALLOWED_HOSTS);
        let trusted_origins = self.env.var_or(CSRF_TRUSTED_ORIGINS, "");
        let conn_str = self
            .env
            .var(DATABASE_CONNECTION_STRING)
            .unwrap_or_else(|| DEV_CONNECTION_STRING.to_string());

        Ok(Settings {
            profile: Profile::Development,
            secret_key: SecretKey::new(secret_key),
            debug: true,
            allowed_hosts: AllowedHosts::from_csv(&allowed_hosts),
            csrf_trusted_origins: CsrfTrustedOrigins::from_csv(&trusted_origins),
            middleware: Middleware::DEVELOPMENT.to_vec(),
            storages: StorageBackend::FileSystem,
            static_root: self.base_dir().join(STATIC_DIR),
            static_url: STATIC_URL.to_string(),
            database: DatabaseSettings::from_connection_string(&conn_str)?,
        })
    }

    /// Hosted settings: base plus the required environment overrides.
    ///
    /// Required variables are checked before anything else, in a fixed order,
    /// so the first missing one is always the one reported.
    pub fn production(&self) -> Result<Settings, ConfigError> {
        let secret_key = self.env.required(SECRET_KEY)?;
        let hostname = self.env.required(WEBSITE_HOSTNAME)?;
        let hostname = hostname.trim();
        let conn_str = self.env.required(DATABASE_CONNECTION_STRING)?;

        let base = self.base()?;

        Ok(Settings {
            profile: Profile::Production,
            secret_key: SecretKey::new(secret_key),
            debug: false,
            allowed_hosts: AllowedHosts::from_hostname(hostname),
            csrf_trusted_origins: CsrfTrustedOrigins::from_hostname(hostname),
            middleware: Middleware::PRODUCTION.to_vec(),
            storages: StorageBackend::CompressedStatic,
            database: DatabaseSettings::from_connection_string(&conn_str)?,
            ..base
        })
    }

    fn base_dir(&self) -> PathBuf {
        self.env
            .var(BASE_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
