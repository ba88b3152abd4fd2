pub mod commands;
pub mod config;
pub mod dispatch;
pub mod env;
pub mod runtime;
pub mod serve;

pub use commands::Commands;
pub use config::{cmd_config, ConfigArgs};
pub use dispatch::dispatch;
pub use env::CliArgs;
pub use runtime::init_logging;
pub use serve::{build_state, cmd_serve, ServeArgs};
