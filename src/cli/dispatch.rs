use anyhow::Result;

use super::commands::Commands;
use super::config::cmd_config;
use super::env::CliArgs;
use super::serve::cmd_serve;
use crate::config::LoadedConfig;

pub async fn dispatch(cli: &CliArgs, loaded: LoadedConfig) -> Result<()> {
    match cli.command.clone() {
        Commands::Serve(args) => cmd_serve(args, loaded.config).await,
        Commands::Config(args) => cmd_config(args, &loaded),
    }
}
