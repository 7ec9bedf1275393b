//! Post-deployment smoke test.
//!
//! Resolves one live member through the coordination service and fetches
//! its administrative system-info endpoint. Advisory only: the workflow
//! logs a failure and moves on, because the deployment already succeeded by
//! the time this runs.

use serde_json::{Map, Value};
use tracing::info;

use crate::config::Timing;
use crate::error::HealthError;
use crate::port::{Coordinator, HttpGateway};
use crate::service::discovery::resolve_one_live_member;
use crate::service::fetch::fetch_json;

/// Node-relative path of the administrative system-info endpoint.
pub const SYSTEM_INFO_PATH: &str = "admin/info/system";

/// One bounded retry on a transient failure.
const HEALTH_FETCH_ATTEMPTS: u32 = 2;

/// Query the system-info endpoint of an arbitrary live cluster member.
pub async fn verify_cluster_health(
    coordinator: &dyn Coordinator,
    gateway: &dyn HttpGateway,
    zk_host: &str,
    timing: &Timing,
) -> Result<Map<String, Value>, HealthError> {
    let member = resolve_one_live_member(coordinator, zk_host).await?;
    let url = format!("{}{SYSTEM_INFO_PATH}", member.base_url);
    info!(node = %member.node_id, url = %url, "pinging cluster");
    let system_info = fetch_json(gateway, &url, HEALTH_FETCH_ATTEMPTS, timing).await?;
    Ok(system_info)
}
