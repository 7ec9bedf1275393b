//! Handler for the `deploy` command.

use tracing::info;

use crate::adapter::{HttpCoordinator, ReqwestGateway, RestResourceManager};
use crate::app::Workflow;
use crate::cli::DeployArgs;
use crate::config::{Config, DeployConfig};
use crate::domain::ApplicationState;
use crate::error::Result;

/// Execute the deploy command.
pub async fn execute(args: &DeployArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Apply CLI overrides that live on Config rather than DeployConfig
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    if let Some(secs) = args.wait_timeout {
        config.timing.wait_timeout_secs = Some(secs);
    }

    config.init_logging();

    let deploy = resolve(&config, args)?;
    deploy.validate()?;
    let timing = config.timing();

    info!(
        name = %deploy.app_name,
        manager = %deploy.manager_url,
        "shoal starting"
    );

    let manager = RestResourceManager::new(&deploy.manager_url)?;
    let coordinator = HttpCoordinator::new()?;
    let gateway = ReqwestGateway::new()?;

    let outcome = Workflow::new(&manager, &coordinator, &gateway)
        .run(&deploy, &timing)
        .await?;

    println!(
        "application {} settled at {}",
        outcome.handle, outcome.state
    );
    if outcome.state == ApplicationState::Running && outcome.health.is_none() {
        println!("note: cluster smoke test did not pass; see the log");
    }

    info!("shoal stopped");
    Ok(())
}

/// Merge the config file with CLI overrides into the per-run view.
fn resolve(config: &Config, args: &DeployArgs) -> Result<DeployConfig> {
    let cluster = &config.cluster;
    Ok(DeployConfig {
        app_name: args.name.clone().unwrap_or_else(|| cluster.name.clone()),
        queue: args.queue.clone().unwrap_or_else(|| cluster.queue.clone()),
        zk_host: args
            .zk_host
            .clone()
            .unwrap_or_else(|| cluster.zk_host.clone()),
        port: args.port.unwrap_or(cluster.port),
        nodes: args.nodes.unwrap_or(cluster.nodes),
        memory_mb: args.memory.unwrap_or(cluster.memory_mb),
        vcores: args.vcores.unwrap_or(cluster.vcores),
        hdfs_home: args.hdfs_home.clone().or_else(|| cluster.hdfs_home.clone()),
        package: args.package.clone(),
        archive: args.archive.clone(),
        ext_classpath: args.ext_classpath.clone(),
        manager_url: args
            .manager_url
            .clone()
            .unwrap_or_else(|| config.manager.url.clone()),
        manager_classpath: config.manager.classpath.clone(),
        work_dir: std::env::current_dir()?,
    })
}
