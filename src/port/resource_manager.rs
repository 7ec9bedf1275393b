//! Resource manager port.
//!
//! The manager owns placement, capacity, and queueing; this client only
//! submits a launch request and reads application state back. The
//! diagnostics calls feed pre-submission logging and have no effect on
//! control flow.

use async_trait::async_trait;

use crate::domain::{ApplicationHandle, ApplicationState, LaunchSpec};
use crate::error::SubmitError;

/// Cluster-wide metrics reported by the resource manager.
#[derive(Debug, Clone, Copy)]
pub struct ClusterMetrics {
    /// Number of node managers currently registered.
    pub active_nodes: u32,
}

/// Per-node report from the resource manager.
#[derive(Debug, Clone)]
pub struct NodeReport {
    pub node_id: String,
    pub http_address: String,
    pub rack: String,
    pub containers: u32,
}

/// Scheduler queue description.
#[derive(Debug, Clone)]
pub struct QueueInfo {
    pub name: String,
    pub current_capacity: f32,
    pub max_capacity: f32,
    pub applications: u32,
    pub child_queues: u32,
}

/// Client capability for the external cluster resource manager.
#[async_trait]
pub trait ResourceManager: Send + Sync {
    /// Reserve a draft application and return its handle.
    async fn create_application(&self) -> Result<ApplicationHandle, SubmitError>;

    /// Submit the launch request under a previously created handle.
    async fn submit_application(
        &self,
        handle: &ApplicationHandle,
        spec: &LaunchSpec,
    ) -> Result<(), SubmitError>;

    /// Read the current lifecycle state of an application.
    async fn application_state(
        &self,
        handle: &ApplicationHandle,
    ) -> Result<ApplicationState, SubmitError>;

    /// Cluster-wide metrics, for diagnostics logging only.
    async fn cluster_metrics(&self) -> Result<ClusterMetrics, SubmitError>;

    /// Per-node reports, for diagnostics logging only.
    async fn node_reports(&self) -> Result<Vec<NodeReport>, SubmitError>;

    /// Queue description, for diagnostics logging only.
    async fn queue_info(&self, queue: &str) -> Result<QueueInfo, SubmitError>;
}
