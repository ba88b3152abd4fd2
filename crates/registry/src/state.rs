use std::sync::Arc;

use async_trait::async_trait;
use org_auth::{AccountsService, Authorizer};
use org_core_types::RequestContext;
use org_kv_store::{KvStore, ListOptions, Record, StoreError};
use tracing::{debug, info, warn};

use crate::{
    api::OrgService,
    errors::RegistryError,
    keys::{key_prefix, qid},
    metrics,
    model::{OrgRequest, OrgResponse, OrganizationRecord},
};

pub const CREATE_ACTION: &str = "org.Org.Create";

/// Organization registry wired to its store, authorizer and accounts service.
///
/// Holds no mutable state of its own; uniqueness on create is enforced by
/// [`KvStore::create`].
pub struct OrgRegistry {
    store: Arc<dyn KvStore>,
    authorizer: Arc<dyn Authorizer>,
    accounts: Arc<dyn AccountsService>,
}

impl OrgRegistry {
    pub fn new(
        store: Arc<dyn KvStore>,
        authorizer: Arc<dyn Authorizer>,
        accounts: Arc<dyn AccountsService>,
    ) -> Self {
        Self {
            store,
            authorizer,
            accounts,
        }
    }

    async fn create_org(
        &self,
        ctx: &RequestContext,
        req: &OrgRequest,
    ) -> Result<OrgResponse, RegistryError> {
        validate_name(&req.name)?;
        let namespace = req.options.effective_namespace(ctx);

        self.authorizer
            .authorize_admin(ctx, &namespace, CREATE_ACTION)
            .await
            .map_err(RegistryError::Authorization)?;
        if let Some(account) = ctx.account() {
            info!(account = %account.id, %namespace, "org create authorized");
        }

        let listing = self
            .accounts
            .list_accounts()
            .await
            .map_err(RegistryError::Upstream)?;
        let accounts_json = serde_json::to_string(&listing)
            .map_err(RegistryError::encode("error marshalling account listing to json"))?;

        let key = qid(&req.name);
        match self.store.read(&key).await {
            Ok(_) => return Err(RegistryError::Conflict(key)),
            Err(err) if err.is_not_found() => {}
            Err(err) => {
                return Err(RegistryError::storage(format!(
                    "error reading from store for key '{key}'"
                ))(err))
            }
        }

        let record = OrganizationRecord::now();
        let value = serde_json::to_vec(&record)
            .map_err(RegistryError::encode("error marshalling org value to json"))?;

        match self.store.create(Record::new(key.clone(), value)).await {
            Ok(()) => {}
            Err(StoreError::AlreadyExists(existing)) => {
                warn!(key = %existing, "concurrent create won the race");
                return Err(RegistryError::Conflict(existing));
            }
            Err(err) => {
                return Err(RegistryError::storage(format!(
                    "error writing to store with key '{key}'"
                ))(err))
            }
        }

        debug!(%key, created_at = %record.created_at, "org record written");
        Ok(OrgResponse {
            message: format!("org {} created. - {}", req.name, accounts_json),
            created: record.created_at,
        })
    }

    async fn delete_org(&self, req: &OrgRequest) -> Result<OrgResponse, RegistryError> {
        validate_name(&req.name)?;
        let key = qid(&req.name);
        self.store
            .delete(&key)
            .await
            .map_err(RegistryError::storage(format!("error deleting org '{key}'")))?;
        Ok(OrgResponse::message(format!("org {} deleted.", req.name)))
    }

    async fn list_orgs(&self) -> Result<OrgResponse, RegistryError> {
        let records = self
            .store
            .list(ListOptions::prefix(key_prefix()))
            .await
            .map_err(RegistryError::storage("error listing orgs"))?;
        let data = serde_json::to_string(&records)
            .map_err(RegistryError::encode("error marshalling orgs to json"))?;
        Ok(OrgResponse::message(data))
    }
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::InvalidName(
            "organization name must not be empty".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl OrgService for OrgRegistry {
    async fn create(
        &self,
        ctx: &RequestContext,
        req: &OrgRequest,
    ) -> Result<OrgResponse, RegistryError> {
        info!(name = %req.name, "Received OrgService.Create request");
        let result = self.create_org(ctx, req).await;
        metrics::record_outcome("create", &result);
        result
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        req: &OrgRequest,
    ) -> Result<OrgResponse, RegistryError> {
        info!(name = %req.name, "Received OrgService.Delete request");
        let result = self.delete_org(req).await;
        metrics::record_outcome("delete", &result);
        result
    }

    async fn list(&self) -> Result<OrgResponse, RegistryError> {
        info!("Received OrgService.List request");
        let result = self.list_orgs().await;
        metrics::record_outcome("list", &result);
        result
    }
}
