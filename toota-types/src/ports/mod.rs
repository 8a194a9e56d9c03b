//! Port traits (interfaces for adapters).
//!
//! The resolver and the HTTP layer depend on these traits, not on the
//! process environment or a concrete database driver.

mod database;
mod env;

pub use database::DatabaseProbe;
pub use env::EnvSource;
