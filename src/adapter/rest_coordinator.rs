//! HTTP adapter for the coordination service.
//!
//! The coordination ensemble exposes its cluster-state document over HTTP:
//! live member ids under `live_members`, advertised base URLs under
//! `members`. A session fetches the document once and answers lookups from
//! it until closed.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::DiscoveryError;
use crate::port::{Coordinator, CoordinatorSession};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpCoordinator {
    client: reqwest::Client,
}

impl HttpCoordinator {
    pub fn new() -> Result<Self, DiscoveryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| DiscoveryError::CoordinatorUnavailable {
                address: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Coordinator for HttpCoordinator {
    async fn connect(&self, address: &str) -> Result<Box<dyn CoordinatorSession>, DiscoveryError> {
        let base = if address.contains("://") {
            address.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", address.trim_end_matches('/'))
        };
        debug!(address = %address, "connecting to coordinator");
        Ok(Box::new(HttpSession {
            client: self.client.clone(),
            address: address.to_string(),
            base,
            state: None,
        }))
    }
}

struct HttpSession {
    client: reqwest::Client,
    address: String,
    base: String,
    state: Option<ClusterStateDoc>,
}

impl HttpSession {
    fn unavailable(&self, reason: String) -> DiscoveryError {
        DiscoveryError::CoordinatorUnavailable {
            address: self.address.clone(),
            reason,
        }
    }

    async fn doc(&mut self) -> Result<ClusterStateDoc, DiscoveryError> {
        if let Some(doc) = &self.state {
            return Ok(doc.clone());
        }
        let url = format!("{}/cluster/state", self.base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("{url} returned HTTP {status}")));
        }
        let doc: ClusterStateDoc = response
            .json()
            .await
            .map_err(|e| self.unavailable(format!("malformed cluster state: {e}")))?;
        self.state = Some(doc.clone());
        Ok(doc)
    }
}

#[async_trait]
impl CoordinatorSession for HttpSession {
    async fn live_members(&mut self) -> Result<Vec<String>, DiscoveryError> {
        Ok(self.doc().await?.live_members)
    }

    async fn base_url(&mut self, node_id: &str) -> Result<String, DiscoveryError> {
        let doc = self.doc().await?;
        match doc.members.get(node_id) {
            Some(member) => Ok(member.base_url.clone()),
            None => Err(DiscoveryError::UnknownMember {
                node_id: node_id.to_string(),
            }),
        }
    }

    async fn close(&mut self) {
        self.state = None;
        debug!(address = %self.address, "closed coordinator session");
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ClusterStateDoc {
    live_members: Vec<String>,
    #[serde(default)]
    members: HashMap<String, MemberDoc>,
}

#[derive(Debug, Clone, Deserialize)]
struct MemberDoc {
    base_url: String,
}
