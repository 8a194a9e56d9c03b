//! # Toota Hex
//!
//! Settings resolution and the HTTP adapter built on top of it.
//!
//! ## Architecture
//!
//! - `service/` - Settings resolver (profile selection and env layering)
//! - `env/` - `EnvSource` adapters (process environment, in-memory map)
//! - `inbound/` - HTTP adapter (Axum server and middleware stack)
//!
//! The resolver is generic over `E: EnvSource` and the server over
//! `D: DatabaseProbe`, so both can be driven without a real process
//! environment or database.

pub mod env;
pub mod inbound;
pub mod service;


pub use env::{MapEnv, ProcessEnv};
pub use service::SettingsResolver;
