use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace used when neither the request nor the caller names one.
pub const DEFAULT_NAMESPACE: &str = "micro";

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(pub String);

impl Namespace {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self(DEFAULT_NAMESPACE.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[default]
    User,
    Service,
}

/// Caller identity as issued by the accounts service. Never carries secrets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AccountKind,
    pub issuer: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Account {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Per-request execution context: who is calling and in which namespace.
///
/// Built by the transport layer and passed explicitly into every registry
/// operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestContext {
    account: Option<Account>,
    namespace: Namespace,
}

impl RequestContext {
    pub fn new(account: Option<Account>, namespace: Namespace) -> Self {
        Self { account, namespace }
    }

    pub fn anonymous(namespace: Namespace) -> Self {
        Self {
            account: None,
            namespace,
        }
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_anonymous_in_default_namespace() {
        let ctx = RequestContext::default();
        assert!(ctx.account().is_none());
        assert_eq!(ctx.namespace().as_str(), DEFAULT_NAMESPACE);
    }

    #[test]
    fn account_serializes_kind_as_type() {
        let account = Account {
            id: "ops".into(),
            name: "Ops".into(),
            kind: AccountKind::Service,
            issuer: "micro".into(),
            scopes: vec!["admin".into()],
            metadata: BTreeMap::new(),
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["type"], "service");
        assert!(value.get("metadata").is_none());
        assert!(account.has_scope("admin"));
        assert!(!account.has_scope("service"));
    }
}
