use org_auth::AuthError;
use org_kv_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid organization name: {0}")]
    InvalidName(String),
    #[error("could not authorize request: {0}")]
    Authorization(#[source] AuthError),
    #[error("could not call accounts list: {0}")]
    Upstream(#[source] AuthError),
    #[error("org already exists: {0}")]
    Conflict(String),
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: StoreError,
    },
    #[error("{context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    pub(crate) fn storage(context: impl Into<String>) -> impl FnOnce(StoreError) -> Self {
        let context = context.into();
        move |source| RegistryError::Storage { context, source }
    }

    pub(crate) fn encode(context: impl Into<String>) -> impl FnOnce(serde_json::Error) -> Self {
        let context = context.into();
        move |source| RegistryError::Encode { context, source }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::InvalidName(_) => "invalid_name",
            RegistryError::Authorization(_) => "unauthorized",
            RegistryError::Upstream(_) => "upstream",
            RegistryError::Conflict(_) => "conflict",
            RegistryError::Storage { .. } => "storage",
            RegistryError::Encode { .. } => "encode",
        }
    }
}
