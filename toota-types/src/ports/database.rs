//! Database readiness port.

use crate::error::ProbeError;

/// Minimal database handle the HTTP layer needs.
///
/// The settings crate never talks to the database itself; readiness checks
/// go through this trait so the router can be tested without Postgres.
#[async_trait::async_trait]
pub trait DatabaseProbe: Send + Sync + 'static {
    /// Round-trips a trivial query.
    async fn ping(&self) -> Result<(), ProbeError>;
}
