use async_trait::async_trait;
use org_core_types::RequestContext;

use crate::{
    errors::RegistryError,
    model::{OrgRequest, OrgResponse},
};

#[async_trait]
pub trait OrgService: Send + Sync {
    async fn create(
        &self,
        ctx: &RequestContext,
        req: &OrgRequest,
    ) -> Result<OrgResponse, RegistryError>;
    async fn delete(
        &self,
        ctx: &RequestContext,
        req: &OrgRequest,
    ) -> Result<OrgResponse, RegistryError>;
    async fn list(&self) -> Result<OrgResponse, RegistryError>;
}
