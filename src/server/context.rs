use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use org_auth::AuthError;
use org_core_types::{Namespace, RequestContext};
use tracing::{debug, info_span, warn, Instrument};

use super::state::ServeState;
use crate::errors::ServiceError;

pub const NAMESPACE_HEADER: &str = "x-namespace";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request context built from the caller's headers.
///
/// A missing or unknown bearer token yields an anonymous context; operations
/// that need an identity reject it later.
pub struct CallerContext(pub RequestContext);

#[async_trait]
impl FromRequestParts<ServeState> for CallerContext {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServeState,
    ) -> Result<Self, Self::Rejection> {
        let namespace = header_str(&parts.headers, NAMESPACE_HEADER)
            .map(Namespace::new)
            .unwrap_or_else(|| state.default_namespace().clone());
        let mut ctx = RequestContext::anonymous(namespace);

        if let Some(token) = bearer_token(&parts.headers) {
            match state.accounts().inspect(token).await {
                Ok(account) => ctx = ctx.with_account(account),
                Err(AuthError::Unauthenticated(reason)) => {
                    debug!(%reason, "bearer token rejected; continuing anonymously")
                }
                Err(err) => warn!(%err, "token inspection failed; continuing anonymously"),
            }
        }

        Ok(CallerContext(ctx))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, header::AUTHORIZATION.as_str())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Runs each request inside a span tagged with a request id and echoes the id
/// back in the response headers.
pub(crate) async fn request_id(req: Request, next: Next) -> Response {
    let id = header_str(req.headers(), REQUEST_ID_HEADER)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let span = info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
