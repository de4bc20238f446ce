//! The module contains the errors the engine can return.
//!
//! - [`InvalidAmount`], [`InvalidDate`], [`EmptyField`] and [`InvalidStatus`]
//!   are validation failures on user or backend input.
//! - [`Conflict`] is returned when an expense is no longer `PENDING`.
//! - [`Forbidden`] is returned when the role or ownership does not allow
//!   the operation.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`EmptyField`]: EngineError::EmptyField
//!  [`InvalidStatus`]: EngineError::InvalidStatus
//!  [`Conflict`]: EngineError::Conflict
//!  [`Forbidden`]: EngineError::Forbidden
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("\"{0}\" must not be empty")]
    EmptyField(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl EngineError {
    /// Returns `true` for errors caused by malformed input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidDate(_) | Self::EmptyField(_) | Self::InvalidStatus(_)
        )
    }
}
