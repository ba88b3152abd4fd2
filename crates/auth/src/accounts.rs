use async_trait::async_trait;
use org_core_types::Account;
use subtle::ConstantTimeEq;

use crate::{
    api::AccountsService,
    errors::AuthError,
    model::{AccountListing, AccountSpec},
};

struct Entry {
    token: Vec<u8>,
    account: Account,
}

/// Fixed set of accounts, typically loaded from the service configuration.
pub struct StaticAccounts {
    entries: Vec<Entry>,
}

impl StaticAccounts {
    pub fn new(specs: &[AccountSpec]) -> Self {
        let entries = specs
            .iter()
            .map(|spec| Entry {
                token: spec.token.as_bytes().to_vec(),
                account: spec.account(),
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl AccountsService for StaticAccounts {
    async fn list_accounts(&self) -> Result<AccountListing, AuthError> {
        Ok(AccountListing {
            accounts: self.entries.iter().map(|e| e.account.clone()).collect(),
        })
    }

    async fn inspect(&self, token: &str) -> Result<Account, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Unauthenticated("empty token".into()));
        }
        // Compare against every entry so timing does not reveal which one matched.
        let mut found = None;
        for entry in &self.entries {
            if bool::from(entry.token.as_slice().ct_eq(token.as_bytes())) {
                found = Some(&entry.account);
            }
        }
        found
            .cloned()
            .ok_or_else(|| AuthError::Unauthenticated("unknown token".into()))
    }
}
