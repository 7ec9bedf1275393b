use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use shoal::error::DiscoveryError;
use shoal::port::{Coordinator, CoordinatorSession};

/// Deterministic coordination-service double whose sessions record closes.
pub struct ScriptedCoordinator {
    members: Vec<(String, String)>,
    fail_connect: bool,
    closed: Arc<AtomicBool>,
    connects: Arc<AtomicUsize>,
}

impl ScriptedCoordinator {
    pub fn with_members(members: &[(&str, &str)]) -> Self {
        Self {
            members: members
                .iter()
                .map(|(id, url)| ((*id).to_string(), (*url).to_string()))
                .collect(),
            fail_connect: false,
            closed: Arc::new(AtomicBool::new(false)),
            connects: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn empty() -> Self {
        Self::with_members(&[])
    }

    pub fn failing() -> Self {
        Self {
            fail_connect: true,
            ..Self::empty()
        }
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Coordinator for ScriptedCoordinator {
    async fn connect(&self, address: &str) -> Result<Box<dyn CoordinatorSession>, DiscoveryError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect {
            return Err(DiscoveryError::CoordinatorUnavailable {
                address: address.to_string(),
                reason: "scripted failure".into(),
            });
        }
        Ok(Box::new(ScriptedSession {
            members: self.members.clone(),
            closed: self.closed.clone(),
        }))
    }
}

struct ScriptedSession {
    members: Vec<(String, String)>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl CoordinatorSession for ScriptedSession {
    async fn live_members(&mut self) -> Result<Vec<String>, DiscoveryError> {
        Ok(self.members.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn base_url(&mut self, node_id: &str) -> Result<String, DiscoveryError> {
        self.members
            .iter()
            .find(|(id, _)| id == node_id)
            .map(|(_, url)| url.clone())
            .ok_or_else(|| DiscoveryError::UnknownMember {
                node_id: node_id.to_string(),
            })
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
