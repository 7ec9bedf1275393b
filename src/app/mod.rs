//! Application layer - the deployment workflow.

mod workflow;

pub use workflow::{DeployOutcome, Workflow};
