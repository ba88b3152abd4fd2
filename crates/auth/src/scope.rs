use async_trait::async_trait;
use org_core_types::{Namespace, RequestContext};
use tracing::debug;

use crate::{api::Authorizer, errors::AuthError};

pub const ADMIN_SCOPE: &str = "admin";

/// Grants administrative actions to accounts holding the admin scope.
///
/// An account may administer the namespace that issued it; accounts issued by
/// the default namespace may administer any namespace.
pub struct ScopeAuthorizer {
    admin_scope: String,
    default_namespace: Namespace,
}

impl ScopeAuthorizer {
    pub fn new(default_namespace: Namespace) -> Self {
        Self {
            admin_scope: ADMIN_SCOPE.to_string(),
            default_namespace,
        }
    }

    pub fn with_admin_scope(mut self, scope: impl Into<String>) -> Self {
        self.admin_scope = scope.into();
        self
    }
}

impl Default for ScopeAuthorizer {
    fn default() -> Self {
        Self::new(Namespace::default())
    }
}

#[async_trait]
impl Authorizer for ScopeAuthorizer {
    async fn authorize_admin(
        &self,
        ctx: &RequestContext,
        namespace: &Namespace,
        action: &str,
    ) -> Result<(), AuthError> {
        let account = ctx.account().ok_or_else(|| {
            AuthError::Unauthenticated(format!("{action}: could not get account"))
        })?;

        if !account.has_scope(&self.admin_scope) {
            return Err(AuthError::Forbidden(format!(
                "{action}: account {} lacks the {} scope",
                account.id, self.admin_scope
            )));
        }

        if account.issuer != namespace.as_str()
            && account.issuer != self.default_namespace.as_str()
        {
            return Err(AuthError::Forbidden(format!(
                "{action}: account {} issued by {} cannot act in namespace {namespace}",
                account.id, account.issuer
            )));
        }

        debug!(account = %account.id, %namespace, action, "admin action authorized");
        Ok(())
    }
}
