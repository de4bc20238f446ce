//! Pure derivations over the cached expense set.
//!
//! Nothing here performs I/O or mutates its input: every function takes a
//! slice of [`Expense`](crate::Expense) and returns a read-only projection
//! (filtered copy, page, totals, chart buckets).

mod aggregate;
mod filter;
mod pagination;
mod trend;

pub use aggregate::{
    CategoryShare, StatusTotals, Summary, aggregate_by_category, aggregate_by_status,
    category_breakdown, summary,
};
pub use filter::{filter_by_category, filter_by_status, pending_queue, recent};
pub use pagination::{Page, Pager, paginate, total_pages};
pub use trend::{MonthBucket, YearMonth, monthly_totals, monthly_trend};

/// Default number of rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 5;
/// Default length of the monthly trend.
pub const DEFAULT_MONTHS_BACK: usize = 6;
/// Default length of the "recent expenses" list.
pub const DEFAULT_RECENT: usize = 3;
