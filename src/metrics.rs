use anyhow::{Context, Result};
use once_cell::sync::{Lazy, OnceCell};
use org_registry::metrics as registry_metrics;
use prometheus::{Encoder, Registry, TextEncoder};

static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);
static REGISTER_ONCE: OnceCell<()> = OnceCell::new();

pub fn global_registry() -> &'static Registry {
    &GLOBAL_REGISTRY
}

pub fn register_metrics() {
    REGISTER_ONCE.get_or_init(|| {
        registry_metrics::register_metrics(global_registry());
    });
}

/// Encodes every registered family in the Prometheus text format.
/// Returns the content type together with the body.
pub fn render() -> Result<(String, String)> {
    register_metrics();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&global_registry().gather(), &mut buffer)
        .context("failed to encode prometheus metrics")?;
    let body = String::from_utf8(buffer).context("prometheus metrics are not utf8")?;
    Ok((encoder.format_type().to_string(), body))
}
