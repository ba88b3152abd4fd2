use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use org_auth::{ScopeAuthorizer, StaticAccounts};
use org_kv_store::{FileKvStore, InMemoryKvStore, KvStore};
use org_registry::OrgRegistry;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::{ServiceConfig, StoreBackend};
use crate::metrics;
use crate::server::{build_router, ServeState, ServiceInfo};

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides the configured host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides the configured port)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn cmd_serve(args: ServeArgs, mut config: ServiceConfig) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    let state = build_state(&config)?;
    let router = build_router(state.clone());

    let addr = (config.server.host.as_str(), config.server.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}:{}", addr.0, addr.1))?;
    let local = listener.local_addr().context("listener has no local address")?;
    state.mark_live();
    state.mark_ready();
    info!(
        %local,
        namespace = %config.default_namespace,
        store = ?config.store.backend,
        "{} {} listening",
        config.name,
        config.version
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .context("org service exited unexpectedly")?;
    info!("org service stopped");
    Ok(())
}

/// Wires the store, accounts, authorizer and registry described by `config`.
pub fn build_state(config: &ServiceConfig) -> Result<ServeState> {
    let store: Arc<dyn KvStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(InMemoryKvStore::new()),
        StoreBackend::File => {
            let path = config
                .store
                .path
                .clone()
                .context("store.path is required for the file backend")?;
            let store = FileKvStore::open(&path)
                .with_context(|| format!("failed to open store at {}", path.display()))?;
            info!(path = %path.display(), "file store opened");
            Arc::new(store)
        }
    };

    let accounts = Arc::new(StaticAccounts::new(&config.accounts));
    if accounts.is_empty() {
        warn!("no accounts configured; every Create request will be rejected");
    }
    let authorizer = Arc::new(ScopeAuthorizer::new(config.namespace()));
    let registry = OrgRegistry::new(Arc::clone(&store), authorizer, accounts.clone());
    metrics::register_metrics();

    let info = ServiceInfo::new(
        config.name.clone(),
        config.version.clone(),
        store.backend(),
    );
    Ok(ServeState::new(
        Arc::new(registry),
        accounts,
        config.namespace(),
        info,
    ))
}

async fn shutdown_signal(state: ServeState) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(?err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    state.mark_unready("shutting down");
    info!("shutdown signal received");
}
