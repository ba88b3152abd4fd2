//! Error handling module
//!
//! Maps registry failures onto HTTP status codes and a single JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use org_auth::AuthError;
use org_kv_store::StoreError;
use org_registry::RegistryError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("invalid request body: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Registry(err) => match err {
                RegistryError::InvalidName(_) => "invalid_argument",
                RegistryError::Authorization(AuthError::Unauthenticated(_)) => "unauthorized",
                RegistryError::Authorization(_) => "forbidden",
                RegistryError::Upstream(_) => "upstream",
                RegistryError::Conflict(_) => "conflict",
                RegistryError::Storage {
                    source: StoreError::Unavailable(_),
                    ..
                } => "unavailable",
                RegistryError::Storage { .. } => "storage",
                RegistryError::Encode { .. } => "internal",
            },
            ServiceError::BadRequest(_) => "invalid_argument",
            ServiceError::Internal(_) => "internal",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self.code() {
            "invalid_argument" => StatusCode::BAD_REQUEST,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "forbidden" => StatusCode::FORBIDDEN,
            "conflict" => StatusCode::CONFLICT,
            "upstream" => StatusCode::BAD_GATEWAY,
            "unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(code = self.code(), %message, "request failed");
        } else {
            debug!(code = self.code(), %message, "request rejected");
        }
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_map_to_statuses() {
        let cases = [
            (
                ServiceError::from(RegistryError::Conflict("orgs.acme".into())),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::from(RegistryError::Authorization(AuthError::Unauthenticated(
                    "no account".into(),
                ))),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServiceError::from(RegistryError::Authorization(AuthError::Forbidden(
                    "not admin".into(),
                ))),
                StatusCode::FORBIDDEN,
            ),
            (
                ServiceError::from(RegistryError::Upstream(AuthError::Unavailable(
                    "down".into(),
                ))),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ServiceError::from(RegistryError::Storage {
                    context: "error listing orgs".into(),
                    source: StoreError::Unavailable("down".into()),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ServiceError::from(RegistryError::Storage {
                    context: "error listing orgs".into(),
                    source: StoreError::NotFound,
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::BadRequest("eof".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.http_status(), status, "{err}");
        }
    }

    #[test]
    fn conflict_message_names_the_key() {
        let err = ServiceError::from(RegistryError::Conflict("orgs.acme".into()));
        assert_eq!(err.to_string(), "org already exists: orgs.acme");
        assert_eq!(err.code(), "conflict");
    }
}
