//! Organization registry service
//!
//! Exposes modules for integration testing

pub mod cli;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod server;

pub use config::{load_config, LoadedConfig, ServiceConfig};
pub use errors::{ServiceError, ServiceResult};
pub use server::{build_router, ServeState};
