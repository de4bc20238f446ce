use std::collections::{BTreeMap, HashMap};

use crate::{Amount, Expense, ExpenseStatus};

/// Sum of amounts per status; every status is always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub pending: Amount,
    pub approved: Amount,
    pub rejected: Amount,
}

impl StatusTotals {
    pub fn get(&self, status: ExpenseStatus) -> Amount {
        match status {
            ExpenseStatus::Pending => self.pending,
            ExpenseStatus::Approved => self.approved,
            ExpenseStatus::Rejected => self.rejected,
        }
    }

    fn slot_mut(&mut self, status: ExpenseStatus) -> &mut Amount {
        match status {
            ExpenseStatus::Pending => &mut self.pending,
            ExpenseStatus::Approved => &mut self.approved,
            ExpenseStatus::Rejected => &mut self.rejected,
        }
    }

    /// `(status, total)` pairs in [`ExpenseStatus::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseStatus, Amount)> + '_ {
        ExpenseStatus::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    pub fn total(&self) -> Amount {
        self.pending + self.approved + self.rejected
    }
}

pub fn aggregate_by_status(expenses: &[Expense]) -> StatusTotals {
    let mut totals = StatusTotals::default();
    for expense in expenses {
        *totals.slot_mut(expense.status) += expense.amount;
    }
    totals
}

/// Sum of amounts per distinct category, keyed by the category as stored.
pub fn aggregate_by_category(expenses: &[Expense]) -> BTreeMap<String, Amount> {
    let mut map = BTreeMap::new();
    for expense in expenses {
        *map.entry(expense.category.clone()).or_insert(Amount::ZERO) += expense.amount;
    }
    map
}

/// A slice of the category chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Amount,
    pub count: usize,
    /// Share of the overall total, 0..=100.
    pub percent: u8,
}

/// Per-category totals with counts and percentages, largest first
/// (ties ordered by name).
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryShare> {
    let mut acc: HashMap<&str, (Amount, usize)> = HashMap::new();
    for expense in expenses {
        let slot = acc.entry(expense.category.as_str()).or_default();
        slot.0 += expense.amount;
        slot.1 += 1;
    }

    let total: Amount = acc.values().map(|(amount, _)| *amount).sum();
    let mut out: Vec<CategoryShare> = acc
        .into_iter()
        .map(|(category, (amount, count))| CategoryShare {
            category: category.to_string(),
            amount,
            count,
            percent: amount.percent_of(total),
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Dashboard cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: Amount,
    pub submissions: usize,
    pub by_status: StatusTotals,
}

pub fn summary(expenses: &[Expense]) -> Summary {
    let by_status = aggregate_by_status(expenses);
    Summary {
        total: by_status.total(),
        submissions: expenses.len(),
        by_status,
    }
}
