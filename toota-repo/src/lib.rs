//! # Toota Repository
//!
//! Database adapter for the Toota backend.
//! Turns resolved `DatabaseSettings` into a Postgres pool and implements the
//! `DatabaseProbe` port used by the readiness endpoint.

pub mod postgres;

pub use postgres::{PgDatabase, connect_options};

use toota_types::DatabaseSettings;

/// Build a database handle from resolved settings.
///
/// The pool is lazy: no connection is opened until the first query, so a
/// process can start (and report unready) while the database is down.
///
/// # Examples
///
/// ```ignore
/// let settings = resolver.resolve(Profile::Production)?;
/// let database = build_database(&settings.database);
/// ```
pub fn build_database(settings: &DatabaseSettings) -> PgDatabase {
    PgDatabase::connect_lazy(settings)
}
