use crate::Expense;

/// One page of a table.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: &'a [Expense],
    /// 1-indexed page number.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Page<'_> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages for `count` items; at least 1, even for an empty set.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slices `[(page - 1) * page_size, page * page_size)` out of `expenses`.
///
/// `page == 0` is read as page 1 and `page_size == 0` as 1. A page past the
/// end yields no items; use [`Pager::clamp`] to bring the cursor back.
pub fn paginate(expenses: &[Expense], page: usize, page_size: usize) -> Page<'_> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = expenses.len();

    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: &expenses[start..end],
        page,
        page_size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}

/// Page cursor of a table whose content can change underneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Jumps to `page`, then clamps against `total_items`.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.page = page.max(1);
        self.clamp(total_items);
    }

    pub fn next(&mut self, total_items: usize) {
        if self.page < total_pages(total_items, self.page_size) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Resets to page 1 when the cursor points past the last page.
    pub fn clamp(&mut self, total_items: usize) {
        if self.page > total_pages(total_items, self.page_size) {
            self.page = 1;
        }
    }

    pub fn slice<'a>(&self, expenses: &'a [Expense]) -> Page<'a> {
        paginate(expenses, self.page, self.page_size)
    }
}
