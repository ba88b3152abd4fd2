pub mod accounts;
pub mod api;
pub mod errors;
pub mod model;
pub mod scope;

pub use accounts::StaticAccounts;
pub use api::{AccountsService, Authorizer};
pub use errors::AuthError;
pub use model::{AccountListing, AccountSpec};
pub use scope::{ScopeAuthorizer, ADMIN_SCOPE};

#[cfg(test)]
mod tests;
