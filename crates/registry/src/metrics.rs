use lazy_static::lazy_static;
use prometheus::{core::Collector, opts, IntCounter, IntCounterVec, Registry};
use tracing::error;

use crate::errors::RegistryError;

lazy_static! {
    static ref ORG_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        opts!(
            "org_registry_requests_total",
            "Organization registry operations grouped by outcome"
        ),
        &["op", "outcome"]
    )
    .unwrap();
    static ref ORG_CONFLICTS_TOTAL: IntCounter = IntCounter::new(
        "org_registry_conflicts_total",
        "Create calls rejected because the organization already exists",
    )
    .unwrap();
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register org registry metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, ORG_REQUESTS_TOTAL.clone());
    register(registry, ORG_CONFLICTS_TOTAL.clone());
}

pub fn record_outcome<T>(op: &str, result: &Result<T, RegistryError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) => err.kind(),
    };
    ORG_REQUESTS_TOTAL.with_label_values(&[op, outcome]).inc();
    if matches!(result, Err(RegistryError::Conflict(_))) {
        ORG_CONFLICTS_TOTAL.inc();
    }
}

#[cfg(test)]
pub(crate) fn request_count(op: &str, outcome: &str) -> u64 {
    ORG_REQUESTS_TOTAL.with_label_values(&[op, outcome]).get()
}
