//! Command-line interface definitions.

pub mod deploy;
pub mod status;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shoal - deploy distributed search clusters onto a shared resource manager.
#[derive(Parser, Debug)]
#[command(name = "shoal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a cluster to the resource manager and wait for it to run
    Deploy(DeployArgs),

    /// Show the state of a submitted application
    Status(StatusArgs),
}

/// Arguments for the `deploy` subcommand.
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Supervisor executable package to stage into the container
    #[arg(long, value_name = "FILE")]
    pub package: PathBuf,

    /// Workload distribution archive unpacked on each node
    #[arg(long, value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Application name; defaults to: shoal
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Scheduler queue; defaults to: default
    #[arg(long, value_name = "QUEUE")]
    pub queue: Option<String>,

    /// Address of the coordination-service ensemble; defaults to: localhost:2181
    #[arg(long, value_name = "HOST")]
    pub zk_host: Option<String>,

    /// Port each search node listens on; defaults to: 8983
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Number of search nodes to deploy; defaults to: 1
    #[arg(long, value_name = "INT")]
    pub nodes: Option<u32>,

    /// Memory (MB) to allocate to each node; defaults to: 512
    #[arg(long, value_name = "INT")]
    pub memory: Option<u32>,

    /// Virtual cores to allocate to each node; defaults to: 2
    #[arg(long, value_name = "INT")]
    pub vcores: Option<u32>,

    /// Remote storage home; when set, nodes keep their indexes there
    #[arg(long, value_name = "PATH")]
    pub hdfs_home: Option<String>,

    /// Path to a file of additional classpath entries, one per line
    #[arg(long, value_name = "FILE")]
    pub ext_classpath: Option<PathBuf>,

    /// Resource manager REST endpoint
    #[arg(long, value_name = "URL")]
    pub manager_url: Option<String>,

    /// Give up waiting for the application after this many seconds
    #[arg(long, value_name = "SECS")]
    pub wait_timeout: Option<u64>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Application handle returned at submission
    #[arg(long, value_name = "ID")]
    pub app_id: String,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Resource manager REST endpoint
    #[arg(long, value_name = "URL")]
    pub manager_url: Option<String>,
}
