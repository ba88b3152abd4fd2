use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use org_auth::AccountsService;
use org_core_types::Namespace;
use org_registry::OrgService;
use parking_lot::RwLock;
use serde::Serialize;

/// Static facts about the running service, reported by the health endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct ServiceInfo {
    #[serde(rename = "service")]
    pub name: String,
    pub version: String,
    pub build_date: &'static str,
    pub git_hash: &'static str,
    #[serde(rename = "store")]
    pub store_backend: &'static str,
}

impl ServiceInfo {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        store_backend: &'static str,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            build_date: env!("BUILD_DATE"),
            git_hash: env!("GIT_HASH"),
            store_backend,
        }
    }
}

#[derive(Clone)]
pub struct ServeState {
    orgs: Arc<dyn OrgService>,
    accounts: Arc<dyn AccountsService>,
    default_namespace: Namespace,
    info: Arc<ServiceInfo>,
    health: Arc<ServeHealth>,
}

impl ServeState {
    pub fn new(
        orgs: Arc<dyn OrgService>,
        accounts: Arc<dyn AccountsService>,
        default_namespace: Namespace,
        info: ServiceInfo,
    ) -> Self {
        Self {
            orgs,
            accounts,
            default_namespace,
            info: Arc::new(info),
            health: Arc::new(ServeHealth::default()),
        }
    }

    pub(crate) fn orgs(&self) -> &dyn OrgService {
        self.orgs.as_ref()
    }

    pub(crate) fn accounts(&self) -> &dyn AccountsService {
        self.accounts.as_ref()
    }

    pub(crate) fn default_namespace(&self) -> &Namespace {
        &self.default_namespace
    }

    pub(crate) fn info(&self) -> &ServiceInfo {
        &self.info
    }

    pub(crate) fn health(&self) -> HealthReport {
        self.health.report()
    }

    pub fn mark_live(&self) {
        self.health.mark_live();
    }

    pub fn mark_ready(&self) {
        self.health.mark_ready();
    }

    pub fn mark_unready(&self, error: impl Into<String>) {
        self.health.mark_unready(error);
    }
}

/// What `/livez`, `/readyz` and `/health` report.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HealthReport {
    pub live: bool,
    pub ready: bool,
    #[serde(rename = "last_ready_check_ts")]
    pub last_ready_check: Option<u64>,
    pub last_error: Option<String>,
}

#[derive(Default)]
pub struct ServeHealth {
    report: RwLock<HealthReport>,
}

impl ServeHealth {
    pub fn mark_live(&self) {
        self.report.write().live = true;
    }

    pub fn mark_ready(&self) {
        self.record_check(None);
    }

    pub fn mark_unready(&self, error: impl Into<String>) {
        self.record_check(Some(error.into()));
    }

    pub fn report(&self) -> HealthReport {
        self.report.read().clone()
    }

    fn record_check(&self, error: Option<String>) {
        let checked_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|elapsed| elapsed.as_secs());
        let mut report = self.report.write();
        report.ready = error.is_none();
        report.last_error = error;
        report.last_ready_check = checked_at;
    }
}
