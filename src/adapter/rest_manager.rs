//! REST adapter for the cluster resource manager.
//!
//! Speaks the manager's v1 HTTP API: a draft handle comes from
//! `POST /v1/cluster/apps/new-application`, the submission context goes to
//! `POST /v1/cluster/apps`, and state plus diagnostics are plain GETs under
//! `/v1/cluster/`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApplicationHandle, ApplicationState, ArtifactKind, ArtifactVisibility, LaunchSpec,
};
use crate::error::SubmitError;
use crate::port::{ClusterMetrics, NodeReport, QueueInfo, ResourceManager};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct RestResourceManager {
    client: reqwest::Client,
    base_url: String,
}

impl RestResourceManager {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| SubmitError::Unreachable(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SubmitError> {
        let url = self.endpoint(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SubmitError::Unreachable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Rejected(format!(
                "{url} returned HTTP {status}"
            )));
        }
        response
            .json()
            .await
            .map_err(|e| SubmitError::Rejected(format!("malformed response from {url}: {e}")))
    }
}

#[async_trait]
impl ResourceManager for RestResourceManager {
    async fn create_application(&self) -> Result<ApplicationHandle, SubmitError> {
        let url = self.endpoint("v1/cluster/apps/new-application");
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| SubmitError::Unreachable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Rejected(format!(
                "{url} returned HTTP {status}"
            )));
        }
        let draft: NewApplicationResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::Rejected(format!("malformed response from {url}: {e}")))?;
        Ok(ApplicationHandle::new(draft.application_id))
    }

    async fn submit_application(
        &self,
        handle: &ApplicationHandle,
        spec: &LaunchSpec,
    ) -> Result<(), SubmitError> {
        let url = self.endpoint("v1/cluster/apps");
        let body = SubmissionBody::from_spec(handle, spec);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SubmitError::Unreachable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SubmitError::Rejected(format!("HTTP {status}: {detail}")));
        }
        Ok(())
    }

    async fn application_state(
        &self,
        handle: &ApplicationHandle,
    ) -> Result<ApplicationState, SubmitError> {
        let response: StateResponse = self
            .get_json(&format!("v1/cluster/apps/{handle}/state"))
            .await?;
        Ok(response.state)
    }

    async fn cluster_metrics(&self) -> Result<ClusterMetrics, SubmitError> {
        let response: MetricsResponse = self.get_json("v1/cluster/metrics").await?;
        Ok(ClusterMetrics {
            active_nodes: response.cluster_metrics.active_nodes,
        })
    }

    async fn node_reports(&self) -> Result<Vec<NodeReport>, SubmitError> {
        let response: NodesResponse = self.get_json("v1/cluster/nodes").await?;
        Ok(response
            .nodes
            .node
            .into_iter()
            .map(|node| NodeReport {
                node_id: node.id,
                http_address: node.node_http_address,
                rack: node.rack,
                containers: node.num_containers,
            })
            .collect())
    }

    async fn queue_info(&self, queue: &str) -> Result<QueueInfo, SubmitError> {
        let response: QueueResponse = self.get_json(&format!("v1/cluster/queues/{queue}")).await?;
        Ok(QueueInfo {
            name: response.queue.queue_name,
            current_capacity: response.queue.current_capacity,
            max_capacity: response.queue.max_capacity,
            applications: response.queue.num_applications,
            child_queues: response.queue.num_child_queues,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NewApplicationResponse {
    #[serde(rename = "application-id")]
    application_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct SubmissionBody<'a> {
    application_id: &'a str,
    application_name: &'a str,
    queue: &'a str,
    am_container_spec: ContainerSpecBody<'a>,
    resource: ResourceBody,
}

impl<'a> SubmissionBody<'a> {
    fn from_spec(handle: &'a ApplicationHandle, spec: &'a LaunchSpec) -> Self {
        let local_resources = spec
            .staged_artifacts
            .iter()
            .map(|(name, artifact)| {
                (
                    name.as_str(),
                    LocalResourceBody {
                        resource: artifact.location.display().to_string(),
                        kind: artifact.kind,
                        visibility: artifact.visibility,
                        size: artifact.size,
                        timestamp: artifact.timestamp_ms,
                    },
                )
            })
            .collect();

        Self {
            application_id: handle.as_str(),
            application_name: &spec.app_name,
            queue: &spec.queue,
            am_container_spec: ContainerSpecBody {
                commands: CommandsBody {
                    command: spec.command_line(),
                },
                environment: &spec.environment,
                local_resources,
            },
            resource: ResourceBody {
                memory: spec.resources.memory_mb,
                v_cores: spec.resources.vcores,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ContainerSpecBody<'a> {
    commands: CommandsBody,
    environment: &'a BTreeMap<String, String>,
    local_resources: BTreeMap<&'a str, LocalResourceBody>,
}

#[derive(Debug, Serialize)]
struct CommandsBody {
    command: String,
}

#[derive(Debug, Serialize)]
struct LocalResourceBody {
    resource: String,
    #[serde(rename = "type")]
    kind: ArtifactKind,
    visibility: ArtifactVisibility,
    size: u64,
    timestamp: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceBody {
    memory: u32,
    v_cores: u32,
}

#[derive(Debug, Deserialize)]
struct StateResponse {
    state: ApplicationState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricsResponse {
    cluster_metrics: MetricsBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricsBody {
    active_nodes: u32,
}

#[derive(Debug, Deserialize)]
struct NodesResponse {
    nodes: NodeList,
}

#[derive(Debug, Deserialize)]
struct NodeList {
    node: Vec<NodeBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeBody {
    id: String,
    node_http_address: String,
    rack: String,
    num_containers: u32,
}

#[derive(Debug, Deserialize)]
struct QueueResponse {
    queue: QueueBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueueBody {
    queue_name: String,
    current_capacity: f32,
    max_capacity: f32,
    num_applications: u32,
    num_child_queues: u32,
}
