use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use shoal::domain::{ApplicationHandle, ApplicationState, LaunchSpec};
use shoal::error::SubmitError;
use shoal::port::{ClusterMetrics, NodeReport, QueueInfo, ResourceManager};

/// Deterministic test double for the resource manager.
///
/// State queries consume the scripted sequence in order; running past the
/// end is an error so tests notice unexpected extra polls.
pub struct ScriptedManager {
    states: Mutex<VecDeque<ApplicationState>>,
    state_queries: AtomicUsize,
    submitted: Mutex<Option<LaunchSpec>>,
    reject_submission: Option<String>,
    fail_diagnostics: bool,
}

impl ScriptedManager {
    pub fn with_states(states: &[ApplicationState]) -> Self {
        Self {
            states: Mutex::new(states.iter().copied().collect()),
            state_queries: AtomicUsize::new(0),
            submitted: Mutex::new(None),
            reject_submission: None,
            fail_diagnostics: false,
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            reject_submission: Some(reason.to_string()),
            ..Self::with_states(&[])
        }
    }

    pub fn with_failing_diagnostics(states: &[ApplicationState]) -> Self {
        Self {
            fail_diagnostics: true,
            ..Self::with_states(states)
        }
    }

    pub fn state_queries(&self) -> usize {
        self.state_queries.load(Ordering::SeqCst)
    }

    pub fn submitted_spec(&self) -> Option<LaunchSpec> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceManager for ScriptedManager {
    async fn create_application(&self) -> Result<ApplicationHandle, SubmitError> {
        Ok(ApplicationHandle::new("application_1700000000000_0001"))
    }

    async fn submit_application(
        &self,
        _handle: &ApplicationHandle,
        spec: &LaunchSpec,
    ) -> Result<(), SubmitError> {
        if let Some(reason) = &self.reject_submission {
            return Err(SubmitError::Rejected(reason.clone()));
        }
        *self.submitted.lock().unwrap() = Some(spec.clone());
        Ok(())
    }

    async fn application_state(
        &self,
        _handle: &ApplicationHandle,
    ) -> Result<ApplicationState, SubmitError> {
        self.state_queries.fetch_add(1, Ordering::SeqCst);
        self.states
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SubmitError::Unreachable("state script exhausted".into()))
    }

    async fn cluster_metrics(&self) -> Result<ClusterMetrics, SubmitError> {
        if self.fail_diagnostics {
            return Err(SubmitError::Unreachable("metrics offline".into()));
        }
        Ok(ClusterMetrics { active_nodes: 3 })
    }

    async fn node_reports(&self) -> Result<Vec<NodeReport>, SubmitError> {
        if self.fail_diagnostics {
            return Err(SubmitError::Unreachable("reports offline".into()));
        }
        Ok(vec![NodeReport {
            node_id: "worker-1:8042".into(),
            http_address: "http://worker-1:8042".into(),
            rack: "/default-rack".into(),
            containers: 2,
        }])
    }

    async fn queue_info(&self, queue: &str) -> Result<QueueInfo, SubmitError> {
        if self.fail_diagnostics {
            return Err(SubmitError::Unreachable("queues offline".into()));
        }
        Ok(QueueInfo {
            name: queue.to_string(),
            current_capacity: 0.25,
            max_capacity: 1.0,
            applications: 4,
            child_queues: 0,
        })
    }
}
