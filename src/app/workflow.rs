//! The build → submit → poll → verify workflow.
//!
//! Build and submission failures abort the run. Everything after the
//! application settles - the diagnostics and the smoke test - is advisory:
//! logged, never fatal. The run's success is defined by what the resource
//! manager reports, not by the smoke test passing.

use serde_json::{Map, Value};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::{DeployConfig, Timing};
use crate::domain::{ApplicationHandle, ApplicationState};
use crate::error::Result;
use crate::port::{Coordinator, HttpGateway, ResourceManager};
use crate::service::{build_launch_spec, submit_and_wait, verify_cluster_health};

/// What one deployment run produced.
#[derive(Debug)]
pub struct DeployOutcome {
    pub handle: ApplicationHandle,
    /// Final observed state: RUNNING, KILLED, or FAILED.
    pub state: ApplicationState,
    /// System info returned by the smoke test, when it ran and passed.
    pub health: Option<Map<String, Value>>,
}

/// One deployment run wired to its ports. Each run owns its clients; nothing
/// is shared across invocations.
pub struct Workflow<'a> {
    manager: &'a dyn ResourceManager,
    coordinator: &'a dyn Coordinator,
    gateway: &'a dyn HttpGateway,
}

impl<'a> Workflow<'a> {
    pub fn new(
        manager: &'a dyn ResourceManager,
        coordinator: &'a dyn Coordinator,
        gateway: &'a dyn HttpGateway,
    ) -> Self {
        Self {
            manager,
            coordinator,
            gateway,
        }
    }

    pub async fn run(&self, config: &DeployConfig, timing: &Timing) -> Result<DeployOutcome> {
        debug!(
            name = %config.app_name,
            queue = %config.queue,
            zk_host = %config.zk_host,
            nodes = config.nodes,
            memory_mb = config.memory_mb,
            vcores = config.vcores,
            "resolved deployment options"
        );

        let spec = build_launch_spec(config)?;
        self.log_manager_diagnostics(&config.queue).await;

        let (handle, state) = submit_and_wait(self.manager, &spec, timing).await?;
        info!(app_id = %handle, state = %state, "application settled");

        let health = if state == ApplicationState::Running {
            info!(
                delay_secs = timing.settle_delay.as_secs(),
                "waiting for cluster to register with the coordinator"
            );
            sleep(timing.settle_delay).await;

            match verify_cluster_health(self.coordinator, self.gateway, &config.zk_host, timing)
                .await
            {
                Ok(system_info) => {
                    let system_info_json = Value::Object(system_info.clone());
                    info!(
                        system_info = %system_info_json,
                        "cluster smoke test passed"
                    );
                    Some(system_info)
                }
                Err(e) => {
                    // The deployment already succeeded; the smoke test is advisory.
                    error!(error = %e, "cluster smoke test failed");
                    None
                }
            }
        } else {
            error!(app_id = %handle, state = %state, "application never reached RUNNING");
            None
        };

        Ok(DeployOutcome {
            handle,
            state,
            health,
        })
    }

    /// Pre-submission observability. Failures here are logged and skipped;
    /// diagnostics never gate the submission.
    async fn log_manager_diagnostics(&self, queue: &str) {
        match self.manager.cluster_metrics().await {
            Ok(metrics) => info!(active_nodes = metrics.active_nodes, "cluster metrics"),
            Err(e) => warn!(error = %e, "could not fetch cluster metrics"),
        }

        match self.manager.node_reports().await {
            Ok(nodes) => {
                for node in &nodes {
                    info!(
                        node_id = %node.node_id,
                        http_address = %node.http_address,
                        rack = %node.rack,
                        containers = node.containers,
                        "node report"
                    );
                }
            }
            Err(e) => warn!(error = %e, "could not fetch node reports"),
        }

        match self.manager.queue_info(queue).await {
            Ok(info) => info!(
                queue = %info.name,
                current_capacity = info.current_capacity,
                max_capacity = info.max_capacity,
                applications = info.applications,
                child_queues = info.child_queues,
                "queue info"
            ),
            Err(e) => warn!(error = %e, queue = %queue, "could not fetch queue info"),
        }
    }
}
