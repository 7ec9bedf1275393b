//! Shoal - deploy distributed search clusters onto a shared resource manager.
//!
//! This crate submits a search-cluster workload to an external cluster
//! resource manager, waits for the application to reach a running state, and
//! then smoke-tests the deployment through the workload's own coordination
//! service.
//!
//! # Architecture
//!
//! The workflow core is written against hexagonal ports so it can be tested
//! with deterministic in-memory fakes:
//!
//! - **[`port`]** - Capability traits for the three external systems:
//!   the resource manager, the coordination service, and plain HTTP
//!   endpoints on cluster nodes
//! - **[`adapter`]** - REST/HTTP implementations of the ports over reqwest
//! - **[`service`]** - The submission, polling, and verification core:
//!   launch assembly, state polling, membership resolution, and the
//!   retry-classified JSON fetcher
//! - **[`app`]** - The build → submit → poll → verify workflow
//!
//! # Modules
//!
//! - [`config`] - TOML configuration plus the resolved per-run view
//! - [`domain`] - Manager-agnostic types: launch specs, application states,
//!   cluster members
//! - [`error`] - Error types for the crate
//! - [`cli`] - clap definitions and command handlers
//!
//! # Example
//!
//! ```no_run
//! use shoal::config::DeployConfig;
//! use shoal::service::build_launch_spec;
//! # fn run(config: &DeployConfig) -> shoal::error::Result<()> {
//! let spec = build_launch_spec(config)?;
//! assert!(spec.command_line().contains("-zkHost"));
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;
