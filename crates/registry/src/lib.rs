pub mod api;
pub mod errors;
pub mod keys;
pub mod metrics;
pub mod model;
pub mod state;

pub use api::OrgService;
pub use errors::RegistryError;
pub use keys::{key_prefix, qid, sanitize};
pub use model::{Options, OrgRequest, OrgResponse, OrganizationRecord};
pub use state::OrgRegistry;
