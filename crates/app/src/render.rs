//! Plain-text rendering of the derived views.

use std::fmt::Write;

use engine::{
    Amount, Expense, User,
    views::{CategoryShare, MonthBucket, Page, Summary, YearMonth},
};

const BAR_WIDTH: u128 = 30;

pub fn user_line(user: &User) -> String {
    format!("{} ({}, id {})", user.name, user.role.as_str().to_lowercase(), user.id)
}

fn expense_row(out: &mut String, expense: &Expense, with_owner: bool) {
    let _ = write!(
        out,
        "{:<10} {:<10} {:>12} {:<10} {:<9}",
        expense.id.as_str(),
        expense.date.to_string(),
        expense.amount.to_string(),
        expense.category,
        expense.status.label(),
    );
    if with_owner {
        let _ = write!(out, " {:<12}", expense.submitted_by.as_deref().unwrap_or("-"));
    }
    let _ = writeln!(out, " {}", expense.description);
}

fn table_header(out: &mut String, with_owner: bool) {
    let _ = write!(
        out,
        "{:<10} {:<10} {:>12} {:<10} {:<9}",
        "ID", "DATE", "AMOUNT", "CATEGORY", "STATUS"
    );
    if with_owner {
        let _ = write!(out, " {:<12}", "SUBMITTED BY");
    }
    let _ = writeln!(out, " DESCRIPTION");
}

/// One table page with its navigation footer.
pub fn expense_page(page: &Page<'_>, with_owner: bool) -> String {
    let mut out = String::new();
    if page.total_items == 0 {
        out.push_str("No expenses found.\n");
        return out;
    }

    table_header(&mut out, with_owner);
    for expense in page.items {
        expense_row(&mut out, expense, with_owner);
    }

    let _ = write!(
        out,
        "Page {} of {} ({} expenses)",
        page.page, page.total_pages, page.total_items
    );
    if page.has_prev() {
        let _ = write!(out, "  --page {} for previous", page.page - 1);
    }
    if page.has_next() {
        let _ = write!(out, "  --page {} for next", page.page + 1);
    }
    out.push('\n');
    out
}

pub fn expense_list(expenses: &[&Expense], with_owner: bool) -> String {
    let mut out = String::new();
    if expenses.is_empty() {
        out.push_str("No expenses found.\n");
        return out;
    }
    table_header(&mut out, with_owner);
    for expense in expenses {
        expense_row(&mut out, expense, with_owner);
    }
    out
}

pub fn summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total expenses: {}", summary.total);
    let _ = writeln!(out, "Submissions:    {}", summary.submissions);
    for (status, amount) in summary.by_status.iter() {
        let _ = writeln!(out, "{:<15} {}", format!("{}:", status.label()), amount);
    }
    out
}

pub fn categories(shares: &[CategoryShare]) -> String {
    let mut out = String::from("By category\n");
    if shares.is_empty() {
        out.push_str("  (no data)\n");
    }
    for share in shares {
        let _ = writeln!(
            out,
            "  {:<12} {:>12} {:>3}%  ({} expenses)",
            share.category,
            share.amount.to_string(),
            share.percent,
            share.count
        );
    }
    out
}

fn bar(amount: Amount, max: Amount) -> String {
    if max.is_zero() {
        return String::new();
    }
    let amount = u128::try_from(amount.cents()).unwrap_or(0);
    let max = u128::try_from(max.cents()).unwrap_or(0).max(1);
    let filled = (amount * BAR_WIDTH / max).min(BAR_WIDTH);
    "#".repeat(filled as usize)
}

pub fn trend(buckets: &[MonthBucket]) -> String {
    let mut out = String::from("Monthly trend\n");
    let max = buckets.iter().map(|b| b.amount).max().unwrap_or(Amount::ZERO);
    for bucket in buckets {
        let _ = writeln!(
            out,
            "  {:<6} {:>12} {}",
            bucket.month.label(),
            bucket.amount.to_string(),
            bar(bucket.amount, max)
        );
    }
    out
}

/// Team analytics: one line per month with data, oldest first.
pub fn months<'a>(totals: impl IntoIterator<Item = (&'a YearMonth, &'a Amount)>) -> String {
    let mut out = String::from("By month\n");
    for (month, amount) in totals {
        let _ = writeln!(out, "  {} {:>12}", month, amount.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{ExpenseId, ExpenseStatus, views};

    use super::*;

    fn expense(id: &str, cents: i64, category: &str, status: ExpenseStatus) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount: Amount::from_cents(cents),
            category: category.to_string(),
            description: format!("{category} claim"),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status,
            submitted_by: Some("Alice".to_string()),
        }
    }

    #[test]
    fn page_footer_points_to_neighbours() {
        let items: Vec<_> = (0..12)
            .map(|i| expense(&format!("e{i}"), 100, "Food", ExpenseStatus::Pending))
            .collect();
        let page = views::paginate(&items, 2, 5);

        let text = expense_page(&page, false);

        assert!(text.contains("Page 2 of 3 (12 expenses)"));
        assert!(text.contains("--page 1 for previous"));
        assert!(text.contains("--page 3 for next"));
        assert_eq!(text.lines().count(), 1 + 5 + 1);
    }

    #[test]
    fn empty_page_says_so() {
        let page = views::paginate(&[], 1, 5);
        assert_eq!(expense_page(&page, true), "No expenses found.\n");
    }

    #[test]
    fn owner_column_only_when_requested() {
        let items = [expense("e1", 100, "Food", ExpenseStatus::Approved)];
        let page = views::paginate(&items, 1, 5);
        assert!(expense_page(&page, true).contains("Alice"));
        assert!(!expense_page(&page, false).contains("Alice"));
    }

    #[test]
    fn summary_lists_every_status() {
        let items = [
            expense("e1", 1000, "Food", ExpenseStatus::Pending),
            expense("e2", 250, "Travel", ExpenseStatus::Rejected),
        ];
        let text = summary(&views::summary(&items));

        assert!(text.contains("Total expenses: $12.50"));
        assert!(text.contains("Submissions:    2"));
        assert!(text.contains("Pending:"));
        assert!(text.contains("Approved:"));
        assert!(text.contains("Rejected:"));
    }

    #[test]
    fn bar_handles_huge_totals() {
        let max = Amount::from_cents(i64::MAX);
        assert_eq!(bar(max, max), "#".repeat(30));
        assert_eq!(bar(Amount::from_cents(i64::MAX / 2), max).len(), 14);
        assert_eq!(bar(Amount::ZERO, max), "");
        assert_eq!(bar(Amount::from_cents(5), Amount::ZERO), "");
    }

    #[test]
    fn trend_bars_scale_to_the_largest_month() {
        let items = [expense("e1", 1000, "Food", ExpenseStatus::Approved)];
        let reference = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let text = trend(&views::monthly_trend(&items, 2, reference));

        assert!(text.contains("Mar 24"));
        assert!(text.contains(&"#".repeat(30)));
    }
}
