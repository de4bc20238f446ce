use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Amount, EngineError, ResultEngine};

/// Opaque identifier assigned by the backend; stable for the record's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Review status of an expense.
///
/// Every expense is created `Pending`. An admin moves it once to `Approved`
/// or `Rejected`; both are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Canonical wire code (`PENDING`, ...).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Human label (`Pending`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Validates a status transition and returns the new status.
    ///
    /// Only `Pending -> Approved` and `Pending -> Rejected` are allowed.
    pub fn transition(self, to: ExpenseStatus) -> ResultEngine<ExpenseStatus> {
        match (self, to) {
            (Self::Pending, Self::Approved | Self::Rejected) => Ok(to),
            (from, to) => Err(EngineError::Conflict(format!(
                "cannot move expense from {} to {}",
                from.code(),
                to.code()
            ))),
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(EngineError::InvalidStatus(other.to_string())),
        }
    }
}

/// Decision an admin takes on a pending expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    #[must_use]
    pub const fn target(self) -> ExpenseStatus {
        match self {
            Self::Approve => ExpenseStatus::Approved,
            Self::Reject => ExpenseStatus::Rejected,
        }
    }
}

/// An expense claim as cached on the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    /// Date the expense was incurred (not the submission date).
    pub date: NaiveDate,
    pub status: ExpenseStatus,
    /// Author of the claim, when the backend reports it.
    pub submitted_by: Option<String>,
}

impl Expense {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ExpenseStatus::Pending
    }
}

/// Parses a calendar date as sent by the backend.
///
/// Accepts `YYYY-MM-DD` and ISO-8601 timestamps (`2024-05-01T00:00:00.000Z`),
/// in which case only the date part is kept.
pub fn parse_expense_date(raw: &str) -> ResultEngine<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(format!("\"{trimmed}\" is not a valid date")))
}
