//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams to the three external systems this client talks to:
//! the cluster resource manager, the workload's coordination service, and
//! plain HTTP endpoints on cluster nodes. The workflow core is written
//! against these traits so it can be tested with in-memory fakes that
//! simulate state transitions and membership sets deterministically.

mod coordinator;
mod http;
mod resource_manager;

// Coordination service ports
pub use coordinator::{Coordinator, CoordinatorSession};

// HTTP gateway port
pub use http::{GatewayResponse, HttpGateway};

// Resource manager port
pub use resource_manager::{ClusterMetrics, NodeReport, QueueInfo, ResourceManager};
