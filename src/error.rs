use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while assembling the launch request, before anything is
/// sent to the resource manager.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("{role} artifact not found: {}", .path.display())]
    ArtifactMissing { role: &'static str, path: PathBuf },

    #[error("{role} artifact not readable: {}: {source}", .path.display())]
    ArtifactUnreadable {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read classpath file {}: {source}", .path.display())]
    ClasspathFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config snapshot {}: {reason}", .path.display())]
    ConfigSnapshot { path: PathBuf, reason: String },
}

/// Errors from the submission path. These abort the whole run; a settled
/// KILLED/FAILED application state is reported through the return value
/// instead.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("resource manager rejected the application: {0}")]
    Rejected(String),

    #[error("resource manager unreachable: {0}")]
    Unreachable(String),

    #[error("application did not settle within {waited_secs}s")]
    DeadlineExceeded { waited_secs: u64 },
}

/// Transport-level failures reported by the HTTP gateway.
///
/// The fetcher retries only communication-class variants; everything else
/// surfaces immediately.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("connection refused: {0}")]
    Connect(String),

    #[error("connect timed out: {0}")]
    Timeout(String),

    #[error("connection closed prematurely: {0}")]
    ClosedEarly(String),

    #[error("socket error: {0}")]
    Io(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl GatewayError {
    /// True for transient network-layer failures that are worth a bounded
    /// wait-and-retry, as opposed to application-layer contract violations.
    #[must_use]
    pub const fn is_communication(&self) -> bool {
        matches!(
            self,
            Self::Connect(_) | Self::Timeout(_) | Self::ClosedEarly(_) | Self::Io(_)
        )
    }
}

/// Errors from the retryable JSON fetcher.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed after {attempts} attempt(s): {source}")]
    Communication {
        url: String,
        attempts: u32,
        #[source]
        source: GatewayError,
    },

    #[error("unexpected response from {url}: {reason}")]
    Protocol { url: String, reason: String },
}

/// Errors from cluster membership resolution against the coordination
/// service.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("no live members registered with the coordinator")]
    NoLiveMembers,

    #[error("coordinator at {address} unavailable: {reason}")]
    CoordinatorUnavailable { address: String, reason: String },

    #[error("coordinator has no base URL for member {node_id}")]
    UnknownMember { node_id: String },
}

/// Errors from the post-deployment health check. The workflow logs these
/// and continues; they never change the run's outcome.
#[derive(Error, Debug)]
pub enum HealthError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Health(#[from] HealthError),

    #[error("HTTP client error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
