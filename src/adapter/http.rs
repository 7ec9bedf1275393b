//! reqwest-backed HTTP gateway.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::GatewayError;
use crate::port::{GatewayResponse, HttpGateway};

/// Idle connections kept per host; node endpoints are hit repeatedly during
/// a health check.
const MAX_CONNECTIONS_PER_HOST: usize = 32;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP gateway over a pooled reqwest client.
///
/// Redirects are disabled: health and status endpoints are expected to
/// respond directly.
pub struct ReqwestGateway {
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new() -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(MAX_CONNECTIONS_PER_HOST)
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn get(&self, url: &Url) -> Result<GatewayResponse, GatewayError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?.to_vec();
        Ok(GatewayResponse { status, body })
    }
}

/// Sort a reqwest error into the gateway taxonomy. Premature connection
/// closes surface through the I/O source chain.
fn classify(err: reqwest::Error) -> GatewayError {
    if err.is_connect() {
        return GatewayError::Connect(err.to_string());
    }
    if err.is_timeout() {
        return GatewayError::Timeout(err.to_string());
    }
    if has_io_source(&err) {
        return GatewayError::Io(err.to_string());
    }
    GatewayError::Other(err.to_string())
}

fn has_io_source(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return true;
        }
        source = cause.source();
    }
    false
}
