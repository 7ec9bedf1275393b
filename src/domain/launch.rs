//! The launch request assembled for the resource manager.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Container resource requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceRequest {
    /// Memory in megabytes.
    pub memory_mb: u32,
    /// Virtual cores.
    pub vcores: u32,
}

/// How a staged artifact is materialized in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArtifactKind {
    /// Copied into the container working directory as-is.
    File,
    /// Unpacked into the container working directory.
    Archive,
}

/// Who may share a staged artifact's local copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArtifactVisibility {
    /// Visible only to containers of the owning application.
    Application,
}

/// A local artifact registered for staging into the launched container.
///
/// Size and timestamp are resolved from filesystem metadata at build time;
/// the resource manager uses them to validate the staged copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedArtifact {
    pub location: PathBuf,
    pub size: u64,
    pub timestamp_ms: u64,
    pub kind: ArtifactKind,
    pub visibility: ArtifactVisibility,
}

/// Fully assembled submission descriptor for the resource manager.
///
/// Immutable once built; constructed once per run by
/// `service::launch::build_launch_spec`.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchSpec {
    /// Ordered argv tokens for the supervisor process.
    pub command: Vec<String>,
    /// Capability requested for the supervisor container itself.
    pub resources: ResourceRequest,
    /// Logical name to artifact descriptor.
    pub staged_artifacts: BTreeMap<String, StagedArtifact>,
    /// Environment for the launched process.
    pub environment: BTreeMap<String, String>,
    /// Scheduler queue to submit into.
    pub queue: String,
    /// Application name shown by the resource manager.
    pub app_name: String,
}

impl LaunchSpec {
    /// The command line as a single shell-style string, for logging and for
    /// managers that take the command as one field.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}
