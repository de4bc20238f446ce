//! Domain model of the expense dashboard.
//!
//! The engine owns no I/O: it defines the expense record, the roles and their
//! capabilities, draft validation and the [`views`] used to render tables and
//! charts from the cached expense set.

pub use draft::ExpenseDraft;
pub use error::EngineError;
pub use expense::{Expense, ExpenseId, ExpenseStatus, ReviewDecision, parse_expense_date};
pub use money::Amount;
pub use user::{Role, Scope, User};

mod draft;
mod error;
mod expense;
mod money;
mod user;
mod util;
pub mod views;

pub type ResultEngine<T> = Result<T, EngineError>;
