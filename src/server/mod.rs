mod context;
mod router;
mod state;

pub use context::{CallerContext, NAMESPACE_HEADER, REQUEST_ID_HEADER};
pub use router::build_router;
pub use state::{HealthReport, ServeHealth, ServeState, ServiceInfo};
