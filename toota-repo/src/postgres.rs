//! PostgreSQL adapter.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

use toota_types::{DatabaseProbe, DatabaseSettings, ProbeError, SslMode};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const APPLICATION_NAME: &str = "toota";

/// Maps resolved database settings onto driver connection options.
///
/// Values come only from the settings; `PG*` environment variables are not
/// consulted.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    let mut options = PgConnectOptions::new_without_pgpass()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(settings.password.expose())
        .database(&settings.name)
        .application_name(APPLICATION_NAME);

    if let Some(mode) = settings.ssl_mode {
        options = options.ssl_mode(pg_ssl_mode(mode));
    }

    options
}

fn pg_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

/// PostgreSQL database handle.
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    /// Creates a pool without connecting. Must be called inside a Tokio runtime.
    pub fn connect_lazy(settings: &DatabaseSettings) -> Self {
        let options = connect_options(settings);
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        tracing::debug!(
            host = %settings.host,
            port = settings.port,
            database = %settings.name,
            "Database pool created"
        );

        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProbe for PgDatabase {
    async fn ping(&self) -> Result<(), ProbeError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ProbeError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(conn_str: &str) -> DatabaseSettings {
        DatabaseSettings::from_connection_string(conn_str).unwrap()
    }

    #[test]
    fn test_connect_options_mapping() {
        let options = connect_options(&settings(
            "dbname=toota host=db.example.com user=app password=pw port=6432",
        ));

        assert_eq!(options.get_host(), "db.example.com");
        assert_eq!(options.get_port(), 6432);
        assert_eq!(options.get_username(), "app");
        assert_eq!(options.get_database(), Some("toota"));
        assert_eq!(options.get_application_name(), Some("toota"));
    }

    #[test]
    fn test_sslmode_is_applied() {
        let options = connect_options(&settings(
            "dbname=a host=b user=c password=d sslmode=require",
        ));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));

        let options = connect_options(&settings(
            "dbname=a host=b user=c password=d sslmode=verify-full",
        ));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::VerifyFull));
    }

    #[tokio::test]
    async fn test_lazy_pool_does_not_connect() {
        // Port 1 is never a Postgres server; creation must still succeed.
        let database =
            PgDatabase::connect_lazy(&settings("dbname=a host=127.0.0.1 user=c password=d port=1"));

        assert_eq!(database.pool().size(), 0);
    }
}
