//! Error taxonomy of the client.
//!
//! [`ClientError`] is what the HTTP adapter produces: one variant per class
//! of HTTP failure. Session operations convert it into [`ExpenseError`] or
//! [`AuthError`], which are what callers match on to show a notice.

use engine::EngineError;
use reqwest::StatusCode;
use thiserror::Error;

/// Normalized failure of a single HTTP call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Maps a non-2xx status and its decoded message.
    pub(crate) fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Server { status, message },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("not signed in")]
    NotAuthenticated,
    #[error("session expired, sign in again")]
    SessionExpired,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("server not reachable: {0}")]
    Unreachable(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server not reachable: {0}")]
    Transport(reqwest::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server error {status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("invalid record from server: {0}")]
    InvalidRecord(String),
    #[error("client misconfigured: {0}")]
    Config(String),
}

/// Failure of an expense operation.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("invalid expense: {0}")]
    Validation(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("expense is no longer pending: {0}")]
    Conflict(String),
}

impl ExpenseError {
    /// `true` when the server reported the session as gone.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Auth(AuthError::SessionExpired))
    }
}

impl From<ClientError> for ExpenseError {
    fn from(value: ClientError) -> Self {
        match value {
            ClientError::Unauthorized(_) => Self::Auth(AuthError::SessionExpired),
            ClientError::Forbidden(message) => Self::Auth(AuthError::Forbidden(message)),
            ClientError::NotFound(message) => Self::Fetch(FetchError::NotFound(message)),
            ClientError::Conflict(message) => Self::Conflict(message),
            ClientError::Validation(message) => Self::Validation(message),
            ClientError::Server { status, message } => {
                Self::Fetch(FetchError::Server { status, message })
            }
            ClientError::Transport(err) => Self::Fetch(FetchError::Transport(err)),
            ClientError::InvalidBaseUrl(message) => Self::Fetch(FetchError::Config(message)),
        }
    }
}

impl From<EngineError> for ExpenseError {
    fn from(value: EngineError) -> Self {
        match value {
            EngineError::Conflict(message) => Self::Conflict(message),
            EngineError::Forbidden(message) => Self::Auth(AuthError::Forbidden(message)),
            other => Self::Validation(other.to_string()),
        }
    }
}

/// Failure reading or writing the persisted session file.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
