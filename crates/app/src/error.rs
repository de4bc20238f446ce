use client::{AuthError, ClientError, ExpenseError, StateError};
use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid timezone: {0}")]
    Timezone(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Expense(#[from] ExpenseError),
    #[error("session file error: {0}")]
    State(#[from] StateError),
    #[error("{0}")]
    Input(#[from] EngineError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("{0}")]
    Usage(String),
}
