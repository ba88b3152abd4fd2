use async_trait::async_trait;
use org_core_types::{Account, Namespace, RequestContext};

use crate::{errors::AuthError, model::AccountListing};

#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Checks that the caller in `ctx` may perform the administrative
    /// `action` (e.g. `org.Org.Create`) inside `namespace`.
    async fn authorize_admin(
        &self,
        ctx: &RequestContext,
        namespace: &Namespace,
        action: &str,
    ) -> Result<(), AuthError>;
}

#[async_trait]
pub trait AccountsService: Send + Sync {
    async fn list_accounts(&self) -> Result<AccountListing, AuthError>;

    /// Resolves a bearer token to the account it was issued for.
    async fn inspect(&self, token: &str) -> Result<Account, AuthError>;
}
