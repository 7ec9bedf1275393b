//! A live cluster member discovered through the coordination service.

use std::fmt;

/// One live node of the deployed cluster.
///
/// The member set is unordered; resolution picks an arbitrary element, which
/// is acceptable for a smoke test but must not be relied on for
/// correctness-critical selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMember {
    /// Identifier the node registered with the coordinator.
    pub node_id: String,
    /// Reachable base URL, normalized to end with `/`.
    pub base_url: String,
}

impl fmt::Display for ClusterMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.node_id, self.base_url)
    }
}
