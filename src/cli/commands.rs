use clap::Subcommand;

use super::config::ConfigArgs;
use super::serve::ServeArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Serve the organization API over HTTP
    Serve(ServeArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}
