use thiserror::Error;

use crate::flow::{FlowError, LoginFlow};
use crate::session::SessionError;
use crate::storage::StorageError;

/// Aggregate error for the login pipeline.
///
/// Recoverable outcomes (malformed payloads, field validation, invalid
/// credentials, CSRF failures) never appear here: they are dispatched as
/// responses with the flow's UI merged. What remains is either a client
/// error with no flow state to render into, or a backend failure.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("You are already authenticated")]
    AlreadyAuthenticated,

    #[error("Unable to locate the resource")]
    FlowNotFound,

    #[error("The login flow expired, please try again")]
    FlowExpired { replacement: Box<LoginFlow> },

    #[error("The login flow has already been completed and cannot be used again")]
    FlowUnusable,

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl LoginError {
    fn log(&self) {
        match self {
            LoginError::Crypto(_) | LoginError::Storage(_) => {
                tracing::error!("Login backend failure: {self}")
            }
            _ => tracing::debug!("Login error: {self}"),
        }
    }
}

impl From<FlowError> for LoginError {
    fn from(err: FlowError) -> Self {
        let err = match err {
            FlowError::NotFound => LoginError::FlowNotFound,
            FlowError::Expired { replacement } => LoginError::FlowExpired { replacement },
            FlowError::Crypto(message) => LoginError::Crypto(message),
            FlowError::Storage(message) => LoginError::Storage(message),
        };
        err.log();
        err
    }
}

impl From<StorageError> for LoginError {
    fn from(err: StorageError) -> Self {
        let err = LoginError::Storage(err.to_string());
        err.log();
        err
    }
}

impl From<SessionError> for LoginError {
    fn from(err: SessionError) -> Self {
        let err = LoginError::Crypto(err.to_string());
        err.log();
        err
    }
}

impl From<serde_json::Error> for LoginError {
    fn from(err: serde_json::Error) -> Self {
        let err = LoginError::Storage(err.to_string());
        err.log();
        err
    }
}
