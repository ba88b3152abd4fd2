use anyhow::Result;
use clap::Args;

use crate::config::LoadedConfig;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Also run validation and fail on an invalid configuration
    #[arg(long)]
    pub check: bool,
}

pub fn cmd_config(args: ConfigArgs, loaded: &LoadedConfig) -> Result<()> {
    match &loaded.path {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# built-in defaults"),
    }
    print!("{}", serde_yaml::to_string(&loaded.config.redacted())?);
    if args.check {
        loaded.config.validate()?;
        println!("# configuration is valid");
    }
    Ok(())
}
