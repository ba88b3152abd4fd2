use std::collections::BTreeMap;

use org_core_types::{Account, AccountKind, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountListing {
    pub accounts: Vec<Account>,
}

/// Configured account together with the bearer token that authenticates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AccountKind,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub token: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

fn default_issuer() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl AccountSpec {
    pub fn account(&self) -> Account {
        Account {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            issuer: self.issuer.clone(),
            scopes: self.scopes.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
