use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("accounts service unavailable: {0}")]
    Unavailable(String),
}
