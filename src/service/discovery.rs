//! Cluster membership resolution.
//!
//! The deployed cluster registers its live nodes with the coordination
//! service; this module discovers that set and resolves one member to a
//! reachable base URL.

use tracing::debug;

use crate::domain::ClusterMember;
use crate::error::DiscoveryError;
use crate::port::{Coordinator, CoordinatorSession};

/// Resolve an arbitrary live member of the cluster registered at `address`.
///
/// An empty live-member set is a hard stop: the deployment is unhealthy and
/// no internal retry will change that. The session is released on every
/// exit path.
pub async fn resolve_one_live_member(
    coordinator: &dyn Coordinator,
    address: &str,
) -> Result<ClusterMember, DiscoveryError> {
    let mut session = coordinator.connect(address).await?;
    let outcome = pick_member(session.as_mut()).await;
    session.close().await;
    outcome
}

async fn pick_member(
    session: &mut dyn CoordinatorSession,
) -> Result<ClusterMember, DiscoveryError> {
    let members = session.live_members().await?;
    debug!(live_members = members.len(), "read cluster membership");

    let Some(node_id) = members.into_iter().next() else {
        return Err(DiscoveryError::NoLiveMembers);
    };

    let mut base_url = session.base_url(&node_id).await?;
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    Ok(ClusterMember { node_id, base_url })
}
