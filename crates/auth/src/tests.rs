use org_core_types::{AccountKind, Namespace, RequestContext};

use crate::{AccountSpec, AccountsService, AuthError, Authorizer, ScopeAuthorizer, StaticAccounts};

fn spec(id: &str, issuer: &str, scopes: &[&str], token: &str) -> AccountSpec {
    AccountSpec {
        id: id.into(),
        name: id.into(),
        kind: AccountKind::User,
        issuer: issuer.into(),
        scopes: scopes.iter().map(|s| s.to_string()).collect(),
        token: token.into(),
        metadata: Default::default(),
    }
}

fn accounts() -> StaticAccounts {
    StaticAccounts::new(&[
        spec("root", "micro", &["admin"], "root-token"),
        spec("acme-admin", "acme", &["admin"], "acme-token"),
        spec("viewer", "micro", &["service"], "viewer-token"),
    ])
}

#[tokio::test]
async fn inspect_resolves_known_tokens_only() {
    let accounts = accounts();
    assert_eq!(accounts.inspect("acme-token").await.unwrap().id, "acme-admin");
    assert!(matches!(
        accounts.inspect("nope").await,
        Err(AuthError::Unauthenticated(_))
    ));
    assert!(matches!(
        accounts.inspect("").await,
        Err(AuthError::Unauthenticated(_))
    ));
}

#[tokio::test]
async fn listing_never_exposes_tokens() {
    let listing = accounts().list_accounts().await.unwrap();
    assert_eq!(listing.accounts.len(), 3);
    let json = serde_json::to_string(&listing).unwrap();
    assert!(!json.contains("root-token"));
    assert!(json.contains("\"id\":\"root\""));
}

#[tokio::test]
async fn anonymous_callers_are_unauthenticated() {
    let authorizer = ScopeAuthorizer::default();
    let ctx = RequestContext::anonymous(Namespace::default());
    let err = authorizer
        .authorize_admin(&ctx, ctx.namespace(), "org.Org.Create")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthenticated(ref msg) if msg.contains("org.Org.Create")));
}

#[tokio::test]
async fn admin_scope_and_issuer_rules() {
    let accounts = accounts();
    let authorizer = ScopeAuthorizer::default();
    let acme = Namespace::new("acme");
    let other = Namespace::new("other");

    let root = RequestContext::anonymous(acme.clone())
        .with_account(accounts.inspect("root-token").await.unwrap());
    authorizer
        .authorize_admin(&root, &other, "org.Org.Create")
        .await
        .unwrap();

    let acme_admin = RequestContext::anonymous(acme.clone())
        .with_account(accounts.inspect("acme-token").await.unwrap());
    authorizer
        .authorize_admin(&acme_admin, &acme, "org.Org.Create")
        .await
        .unwrap();
    assert!(matches!(
        authorizer
            .authorize_admin(&acme_admin, &other, "org.Org.Create")
            .await,
        Err(AuthError::Forbidden(_))
    ));

    let viewer = RequestContext::anonymous(acme.clone())
        .with_account(accounts.inspect("viewer-token").await.unwrap());
    assert!(matches!(
        authorizer
            .authorize_admin(&viewer, &acme, "org.Org.Create")
            .await,
        Err(AuthError::Forbidden(_))
    ));
}

#[tokio::test]
async fn custom_admin_scope() {
    let accounts = accounts();
    let authorizer = ScopeAuthorizer::default().with_admin_scope("service");
    let viewer = RequestContext::default()
        .with_account(accounts.inspect("viewer-token").await.unwrap());
    authorizer
        .authorize_admin(&viewer, &Namespace::default(), "org.Org.Create")
        .await
        .unwrap();
}

#[test]
fn account_spec_defaults_issuer_to_default_namespace() {
    let spec: AccountSpec = serde_json::from_value(serde_json::json!({
        "id": "svc",
        "token": "t",
        "type": "service"
    }))
    .unwrap();
    assert_eq!(spec.issuer, "micro");
    assert_eq!(spec.kind, AccountKind::Service);
    assert!(spec.scopes.is_empty());
}
