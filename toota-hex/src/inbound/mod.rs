//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server whose middleware stack is driven by `Settings`.

mod csrf;
mod handlers;
mod hosts;
mod security;
mod server;
mod static_files;

pub use handlers::AppState;
pub use server::HttpServer;
