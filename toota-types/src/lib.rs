//! # Toota Types
//!
//! Settings domain types and port traits for the Toota backend.
//! This crate has no IO dependencies - only data structures,
//! parsing rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Settings values (connection string, hosts, profiles)
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Configuration and probe error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AllowedHosts, ConnectionParams, CsrfTrustedOrigins, DatabaseEngine, DatabaseSettings,
    Middleware, Profile, SecretKey, Settings, SslMode, StorageBackend,
};
pub use error::{ConfigError, ProbeError};
pub use ports::{DatabaseProbe, EnvSource};
