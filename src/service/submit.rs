//! Submission and state polling.
//!
//! Submits the launch request and then polls application state until it
//! settles at RUNNING, KILLED, or FAILED. A settled failure state is not an
//! error here; the caller decides how to report it. Only submission-time
//! failures (rejection, manager unreachable) abort.

use std::time::Instant;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Timing;
use crate::domain::{ApplicationHandle, ApplicationState, LaunchSpec};
use crate::error::SubmitError;
use crate::port::ResourceManager;

/// Submit `spec` and block until the application settles.
///
/// Queries state once right after submission, then sleeps `poll_interval`
/// between queries. With no deadline configured this waits forever, matching
/// the manager's own lack of a bound; `Timing::deadline` caps the wait when
/// set.
pub async fn submit_and_wait(
    manager: &dyn ResourceManager,
    spec: &LaunchSpec,
    timing: &Timing,
) -> Result<(ApplicationHandle, ApplicationState), SubmitError> {
    let handle = manager.create_application().await?;
    info!(
        app_id = %handle,
        name = %spec.app_name,
        queue = %spec.queue,
        "submitting application"
    );
    manager.submit_application(&handle, spec).await?;

    let submitted_at = Instant::now();
    let mut state = manager.application_state(&handle).await?;
    while !state.is_settled() {
        if let Some(deadline) = timing.deadline {
            if submitted_at.elapsed() >= deadline {
                return Err(SubmitError::DeadlineExceeded {
                    waited_secs: deadline.as_secs(),
                });
            }
        }
        debug!(app_id = %handle, state = %state, "application not settled yet");
        sleep(timing.poll_interval).await;
        state = manager.application_state(&handle).await?;
    }

    Ok((handle, state))
}
