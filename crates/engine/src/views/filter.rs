use crate::{Expense, ExpenseStatus, util::fold_key};

/// Case-insensitive substring match on `category`.
///
/// An empty (or blank) `term` returns the input unchanged.
pub fn filter_by_category(expenses: &[Expense], term: &str) -> Vec<Expense> {
    let term = term.trim();
    if term.is_empty() {
        return expenses.to_vec();
    }
    let needle = fold_key(term);
    expenses
        .iter()
        .filter(|e| fold_key(&e.category).contains(&needle))
        .cloned()
        .collect()
}

pub fn filter_by_status(expenses: &[Expense], status: ExpenseStatus) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| e.status == status)
        .cloned()
        .collect()
}

/// Expenses waiting for an admin decision.
pub fn pending_queue(expenses: &[Expense]) -> Vec<Expense> {
    filter_by_status(expenses, ExpenseStatus::Pending)
}

/// The `n` most recent expenses by date, newest first.
///
/// The sort is stable: expenses sharing a date keep their input order.
pub fn recent(expenses: &[Expense], n: usize) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}
