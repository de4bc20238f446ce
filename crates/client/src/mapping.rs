//! Conversions between wire types and the engine's domain model.

use api_types::{
    auth::{Role as ApiRole, UserView},
    expense::{ExpenseBody, ExpenseStatus as ApiStatus, ExpenseView, WireAmount},
};
use engine::{
    Amount, EngineError, Expense, ExpenseDraft, ExpenseId, ExpenseStatus, Role, User, parse_expense_date,
};

use crate::error::FetchError;

pub(crate) fn map_role(role: ApiRole) -> Role {
    match role {
        ApiRole::Employee => Role::Employee,
        ApiRole::Admin => Role::Admin,
    }
}

pub(crate) fn map_status(status: ApiStatus) -> ExpenseStatus {
    match status {
        ApiStatus::Pending => ExpenseStatus::Pending,
        ApiStatus::Approved => ExpenseStatus::Approved,
        ApiStatus::Rejected => ExpenseStatus::Rejected,
    }
}

pub(crate) fn api_status(status: ExpenseStatus) -> ApiStatus {
    match status {
        ExpenseStatus::Pending => ApiStatus::Pending,
        ExpenseStatus::Approved => ApiStatus::Approved,
        ExpenseStatus::Rejected => ApiStatus::Rejected,
    }
}

pub(crate) fn map_user(view: UserView) -> User {
    User {
        id: view.id,
        name: view.name,
        role: map_role(view.role),
    }
}

fn map_amount(amount: &WireAmount) -> Result<Amount, EngineError> {
    match amount {
        WireAmount::Number(value) => Amount::try_from_major(*value),
        WireAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| EngineError::InvalidAmount(format!("\"{text}\" is not a number")))
            .and_then(Amount::try_from_major),
    }
}

/// Validates a backend record against the domain model.
pub(crate) fn map_expense(view: ExpenseView) -> Result<Expense, FetchError> {
    let invalid = |err: EngineError| FetchError::InvalidRecord(format!("expense {}: {err}", view.id));

    let amount = map_amount(&view.amount).map_err(invalid)?;
    let date = parse_expense_date(&view.date).map_err(invalid)?;
    let submitted_by = view
        .submitted_by
        .into_iter()
        .chain(view.user_name)
        .find(|name| !name.trim().is_empty());

    Ok(Expense {
        id: ExpenseId::new(view.id),
        amount,
        category: view.category,
        description: view.description,
        date,
        status: map_status(view.status),
        submitted_by,
    })
}

pub(crate) fn map_expenses(views: Vec<ExpenseView>) -> Result<Vec<Expense>, FetchError> {
    views.into_iter().map(map_expense).collect()
}

pub(crate) fn expense_body(draft: &ExpenseDraft) -> ExpenseBody {
    ExpenseBody {
        amount: draft.amount().to_major(),
        category: draft.category().to_string(),
        description: draft.description().to_string(),
        date: draft.date().format("%Y-%m-%d").to_string(),
    }
}
