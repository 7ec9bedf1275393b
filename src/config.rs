//! Configuration loading from TOML files plus the resolved per-run view.
//!
//! `Config` is what an optional `shoal.toml` provides: manager endpoint,
//! cluster defaults, timing, and logging. `DeployConfig` is the fully
//! resolved input to one deployment run, produced by merging the file with
//! CLI overrides; it is passed explicitly through the workflow call chain
//! rather than stashed in process-wide state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Built-in classpath entries handed to the launched supervisor when the
/// config file does not override them. Placeholders are expanded by the
/// resource manager at container launch.
pub const DEFAULT_MANAGER_CLASSPATH: &[&str] = &["{{MANAGER_CONF_DIR}}", "{{MANAGER_HOME}}/lib/*"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub manager: ManagerConfig,
    pub cluster: ClusterConfig,
    pub timing: TimingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Base URL of the resource manager REST endpoint.
    pub url: String,
    /// Classpath entries for the launched supervisor.
    pub classpath: Vec<String>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8088".into(),
            classpath: DEFAULT_MANAGER_CLASSPATH
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub name: String,
    pub queue: String,
    /// Coordination-service address the cluster registers with.
    pub zk_host: String,
    /// Port each search node listens on.
    pub port: u16,
    pub nodes: u32,
    /// Memory (MB) requested per search node.
    pub memory_mb: u32,
    /// Virtual cores requested per search node.
    pub vcores: u32,
    /// Optional remote storage home; when set, nodes keep their indexes there.
    pub hdfs_home: Option<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: "shoal".into(),
            queue: "default".into(),
            zk_host: "localhost:2181".into(),
            port: 8983,
            nodes: 1,
            memory_mb: 512,
            vcores: 2,
            hdfs_home: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub retry_delay_secs: u64,
    pub poll_interval_secs: u64,
    pub settle_delay_secs: u64,
    /// Optional cap on the total post-submission wait. Absent means wait
    /// forever, matching the manager's own lack of a deadline.
    pub wait_timeout_secs: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            retry_delay_secs: 5,
            poll_interval_secs: 10,
            settle_delay_secs: 10,
            wait_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Runtime sleep durations and the optional deadline.
    #[must_use]
    pub fn timing(&self) -> Timing {
        Timing {
            retry_delay: Duration::from_secs(self.timing.retry_delay_secs),
            poll_interval: Duration::from_secs(self.timing.poll_interval_secs),
            settle_delay: Duration::from_secs(self.timing.settle_delay_secs),
            deadline: self.timing.wait_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

/// Sleep durations used by the workflow. Tests zero these out.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Pause between fetch retries.
    pub retry_delay: Duration,
    /// Pause between application state queries.
    pub poll_interval: Duration,
    /// Pause between observing RUNNING and starting the health check, to
    /// give the fresh cluster time to register with the coordinator.
    pub settle_delay: Duration,
    /// Optional cap on the total post-submission wait.
    pub deadline: Option<Duration>,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(5),
            poll_interval: Duration::from_secs(10),
            settle_delay: Duration::from_secs(10),
            deadline: None,
        }
    }
}

/// The fully resolved input to one deployment run.
#[derive(Debug, Clone, Serialize)]
pub struct DeployConfig {
    pub app_name: String,
    pub queue: String,
    pub zk_host: String,
    pub port: u16,
    pub nodes: u32,
    pub memory_mb: u32,
    pub vcores: u32,
    pub hdfs_home: Option<String>,
    /// Supervisor executable package, staged into the container.
    pub package: PathBuf,
    /// Workload distribution archive the supervisor unpacks on each node.
    pub archive: PathBuf,
    /// Optional file of extra classpath entries, one per line.
    pub ext_classpath: Option<PathBuf>,
    pub manager_url: String,
    pub manager_classpath: Vec<String>,
    /// Directory the optional config snapshot is written into.
    pub work_dir: PathBuf,
}

impl DeployConfig {
    pub fn validate(&self) -> Result<()> {
        if self.zk_host.is_empty() {
            return Err(ConfigError::MissingField { field: "zk_host" }.into());
        }
        if self.nodes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "nodes",
                reason: "at least one node is required".into(),
            }
            .into());
        }
        if self.memory_mb == 0 {
            return Err(ConfigError::InvalidValue {
                field: "memory_mb",
                reason: "per-node memory must be non-zero".into(),
            }
            .into());
        }
        if self.vcores == 0 {
            return Err(ConfigError::InvalidValue {
                field: "vcores",
                reason: "per-node vcores must be non-zero".into(),
            }
            .into());
        }
        Ok(())
    }
}
