//! Coordination service port.
//!
//! The deployed cluster publishes its live membership through an external
//! coordination service. Sessions are scoped: whoever connects must close,
//! on every exit path.

use async_trait::async_trait;

use crate::error::DiscoveryError;

/// Connection factory for the coordination service.
#[async_trait]
pub trait Coordinator: Send + Sync {
    /// Open a session against the service at `address`.
    async fn connect(&self, address: &str) -> Result<Box<dyn CoordinatorSession>, DiscoveryError>;
}

/// An open coordination-service session.
#[async_trait]
pub trait CoordinatorSession: Send {
    /// The identifiers of currently live cluster members.
    async fn live_members(&mut self) -> Result<Vec<String>, DiscoveryError>;

    /// The advertised base URL for one member.
    async fn base_url(&mut self, node_id: &str) -> Result<String, DiscoveryError>;

    /// Release the session. Best effort; failures are swallowed.
    async fn close(&mut self);
}
