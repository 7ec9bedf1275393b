//! Workflow services - the submission, polling, and verification core.

pub mod discovery;
pub mod fetch;
pub mod health;
pub mod launch;
pub mod submit;

pub use discovery::resolve_one_live_member;
pub use fetch::fetch_json;
pub use health::verify_cluster_health;
pub use launch::build_launch_spec;
pub use submit::submit_and_wait;
