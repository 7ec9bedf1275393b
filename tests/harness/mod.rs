#![allow(dead_code)]

pub mod scripted_coordinator;
pub mod scripted_gateway;
pub mod scripted_manager;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use shoal::config::{DeployConfig, Timing};
use shoal::domain::{LaunchSpec, ResourceRequest};

/// Timing with every sleep zeroed so tests run instantly.
pub fn instant_timing() -> Timing {
    Timing {
        retry_delay: Duration::ZERO,
        poll_interval: Duration::ZERO,
        settle_delay: Duration::ZERO,
        deadline: None,
    }
}

/// A minimal launch spec for poller tests.
pub fn launch_spec() -> LaunchSpec {
    LaunchSpec {
        command: vec!["-nodes=1".into(), "-port=8983".into()],
        resources: ResourceRequest {
            memory_mb: 128,
            vcores: 1,
        },
        staged_artifacts: BTreeMap::new(),
        environment: BTreeMap::new(),
        queue: "default".into(),
        app_name: "shoal".into(),
    }
}

/// A resolved deploy config whose artifacts exist under `dir`.
pub fn deploy_config(dir: &Path) -> DeployConfig {
    let package = dir.join("supervisor.bin");
    let archive = dir.join("workload.tgz");
    std::fs::write(&package, b"supervisor").unwrap();
    std::fs::write(&archive, b"workload").unwrap();

    DeployConfig {
        app_name: "shoal".into(),
        queue: "default".into(),
        zk_host: "zk1:2181".into(),
        port: 8983,
        nodes: 1,
        memory_mb: 512,
        vcores: 2,
        hdfs_home: None,
        package,
        archive,
        ext_classpath: None,
        manager_url: "http://localhost:8088".into(),
        manager_classpath: vec!["{{MANAGER_CONF_DIR}}".into()],
        work_dir: dir.to_path_buf(),
    }
}
