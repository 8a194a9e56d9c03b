//! Domain models for deployment settings.

pub mod connection;
pub mod hosts;
pub mod profile;
pub mod secret;
pub mod settings;

pub use connection::{ConnectionParams, DEFAULT_PORT};
pub use hosts::{AllowedHosts, CsrfTrustedOrigins};
pub use profile::Profile;
pub use secret::SecretKey;
pub use settings::{
    DatabaseEngine, DatabaseSettings, Middleware, Settings, SslMode, StorageBackend,
};
