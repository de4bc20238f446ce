use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, NaiveDate};

use crate::{Amount, Expense};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// 1..=12
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// The month before this one.
    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Short chart label, e.g. `Oct 26`.
    pub fn label(self) -> String {
        let abbr = MONTH_ABBR[(self.month - 1) as usize];
        format!("{abbr} {:02}", self.year.rem_euclid(100))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: YearMonth,
    pub amount: Amount,
}

/// Totals for the `months_back` calendar months ending with `reference`'s
/// month, oldest first.
///
/// Expenses are matched on calendar month and year; months without
/// expenses are present with a zero amount.
pub fn monthly_trend(expenses: &[Expense], months_back: usize, reference: NaiveDate) -> Vec<MonthBucket> {
    let mut months = Vec::with_capacity(months_back);
    let mut cursor = YearMonth::of(reference);
    for _ in 0..months_back {
        months.push(cursor);
        cursor = cursor.pred();
    }
    months.reverse();

    let totals = monthly_totals(expenses);
    months
        .into_iter()
        .map(|month| MonthBucket {
            month,
            amount: totals.get(&month).copied().unwrap_or(Amount::ZERO),
        })
        .collect()
}

/// Totals for every month that has at least one expense.
pub fn monthly_totals(expenses: &[Expense]) -> BTreeMap<YearMonth, Amount> {
    let mut map = BTreeMap::new();
    for expense in expenses {
        *map.entry(YearMonth::of(expense.date)).or_insert(Amount::ZERO) += expense.amount;
    }
    map
}
