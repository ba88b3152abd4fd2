//! Service configuration.
//!
//! Values come from a YAML file (explicit path, `./config/org-service.yaml`,
//! or the per-user config directory), then environment overrides.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use org_auth::AccountSpec;
use org_core_types::{Namespace, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};

pub const HOST_ENV: &str = "ORG_SERVICE_HOST";
pub const PORT_ENV: &str = "ORG_SERVICE_PORT";
pub const NAMESPACE_ENV: &str = "ORG_SERVICE_NAMESPACE";
pub const STORE_PATH_ENV: &str = "ORG_SERVICE_STORE_PATH";

const LOCAL_CONFIG: &str = "config/org-service.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
    pub server: ServerConfig,
    pub default_namespace: String,
    pub store: StoreConfig,
    pub accounts: Vec<AccountSpec>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "org-service".to_string(),
            version: "0.1".to_string(),
            server: ServerConfig::default(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            store: StoreConfig::default(),
            accounts: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).context("invalid service configuration")
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.default_namespace.clone())
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var(HOST_ENV) {
            self.server.host = host;
        }
        if let Ok(port) = env::var(PORT_ENV) {
            self.server.port = port
                .parse()
                .with_context(|| format!("{PORT_ENV} must be a port number, got '{port}'"))?;
        }
        if let Ok(namespace) = env::var(NAMESPACE_ENV) {
            self.default_namespace = namespace;
        }
        if let Ok(path) = env::var(STORE_PATH_ENV) {
            self.store.backend = StoreBackend::File;
            self.store.path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_namespace.trim().is_empty() {
            bail!("default_namespace must not be empty");
        }
        if self.store.backend == StoreBackend::File && self.store.path.is_none() {
            bail!("store.path is required for the file backend");
        }
        let mut tokens = HashSet::new();
        for account in &self.accounts {
            if account.id.trim().is_empty() {
                bail!("account ids must not be empty");
            }
            if account.token.is_empty() {
                bail!("account '{}' has an empty token", account.id);
            }
            if !tokens.insert(account.token.as_str()) {
                bail!("account '{}' reuses another account's token", account.id);
            }
        }
        Ok(())
    }

    /// Copy safe to print: account tokens are masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for account in &mut copy.accounts {
            account.token = "***".to_string();
        }
        copy
    }
}

pub struct LoadedConfig {
    pub config: ServiceConfig,
    pub path: Option<PathBuf>,
}

pub fn load_config(config_path: Option<&Path>) -> Result<LoadedConfig> {
    let path = match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            Some(path.to_path_buf())
        }
        None => default_config_path(),
    };

    let mut config = match &path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            ServiceConfig::from_yaml_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => ServiceConfig::default(),
    };

    config.apply_env_overrides()?;
    Ok(LoadedConfig { config, path })
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }
    let mut user = dirs::config_dir()?;
    user.push("org-service");
    user.push("config.yaml");
    user.exists().then_some(user)
}
