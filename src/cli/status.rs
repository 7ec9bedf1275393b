//! Handler for the `status` command.

use crate::adapter::RestResourceManager;
use crate::cli::StatusArgs;
use crate::config::Config;
use crate::domain::ApplicationHandle;
use crate::error::Result;
use crate::port::ResourceManager;

/// Execute the status command.
pub async fn execute(args: &StatusArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.init_logging();

    let manager_url = args
        .manager_url
        .clone()
        .unwrap_or_else(|| config.manager.url.clone());
    let manager = RestResourceManager::new(&manager_url)?;

    let handle = ApplicationHandle::from(args.app_id.as_str());
    let state = manager.application_state(&handle).await?;
    println!("application {handle}: {state}");
    Ok(())
}
