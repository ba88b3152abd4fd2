use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use org_service::cli::{dispatch, init_logging, CliArgs};
use org_service::config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();
    init_logging(&cli.log_level, cli.debug, cli.json_logs)?;

    let loaded = load_config(cli.config.as_deref())?;
    match &loaded.path {
        Some(path) => info!(path = %path.display(), "configuration loaded"),
        None => debug!("no configuration file found; using defaults"),
    }

    dispatch(&cli, loaded).await
}
