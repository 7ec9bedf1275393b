//! HTTP gateway port for node-level endpoints.
//!
//! The fetcher talks to cluster nodes through this trait so that transport
//! failures arrive pre-classified and tests can script responses without a
//! network.

use async_trait::async_trait;
use url::Url;

use crate::error::GatewayError;

/// A raw HTTP response: status plus body bytes. Interpretation (JSON
/// decoding, status checks) belongs to the caller.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl GatewayResponse {
    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP GET capability.
///
/// Implementations must not follow redirects - health and status endpoints
/// are expected to respond directly.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// Issue a GET and return the raw response.
    async fn get(&self, url: &Url) -> Result<GatewayResponse, GatewayError>;
}
