//! Application identity and lifecycle state as reported by the resource
//! manager.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque application identifier - newtype for type safety.
///
/// Returned by the resource manager on submission and used as the key for
/// all subsequent state queries. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationHandle(String);

impl ApplicationHandle {
    /// Create a new ApplicationHandle from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ApplicationHandle {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApplicationHandle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lifecycle state of a submitted application.
///
/// Externally owned - the resource manager drives the transitions and this
/// system only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationState {
    New,
    Submitted,
    Accepted,
    Running,
    Failed,
    Killed,
    Finished,
}

impl ApplicationState {
    /// True once the launch workflow has nothing left to wait for: the
    /// application is either running or will never run.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Running | Self::Killed | Self::Failed)
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "NEW",
            Self::Submitted => "SUBMITTED",
            Self::Accepted => "ACCEPTED",
            Self::Running => "RUNNING",
            Self::Failed => "FAILED",
            Self::Killed => "KILLED",
            Self::Finished => "FINISHED",
        };
        write!(f, "{name}")
    }
}
