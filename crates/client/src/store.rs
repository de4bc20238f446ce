use engine::{Expense, ExpenseId, Scope};
use tokio::sync::RwLock;

/// Token identifying one `load` request.
///
/// Tokens increase monotonically; a response is applied only if no newer
/// state has been written since its request was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    scope: Scope,
}

impl LoadTicket {
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    items: Vec<Expense>,
    scope: Option<Scope>,
    /// Last ticket handed out.
    issued: u64,
    /// Tickets up to this one are stale.
    applied: u64,
}

impl StoreInner {
    /// Makes every load issued so far stale.
    fn fence(&mut self) {
        self.applied = self.issued;
    }
}

/// Cache of the expenses visible to the current session.
///
/// The store is the single owner of the working set; callers get clones or
/// borrow it through [`ExpenseStore::read`]. It never refreshes itself.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    inner: RwLock<StoreInner>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin_load(&self, scope: Scope) -> LoadTicket {
        let mut inner = self.inner.write().await;
        inner.issued += 1;
        LoadTicket {
            seq: inner.issued,
            scope,
        }
    }

    /// Replaces the whole content with `items`, unless the ticket is stale.
    ///
    /// Returns whether the records were applied.
    pub async fn apply_load(&self, ticket: LoadTicket, items: Vec<Expense>) -> bool {
        let mut inner = self.inner.write().await;
        if ticket.seq <= inner.applied {
            tracing::warn!(
                ticket = ticket.seq,
                applied = inner.applied,
                "discarding stale expense load"
            );
            return false;
        }
        tracing::debug!(ticket = ticket.seq, count = items.len(), "expense store refreshed");
        inner.items = items;
        inner.scope = Some(ticket.scope);
        inner.applied = ticket.seq;
        true
    }

    /// Merges a single record returned by a mutation.
    pub async fn upsert(&self, expense: Expense) {
        let mut inner = self.inner.write().await;
        inner.fence();
        match inner.items.iter().position(|e| e.id == expense.id) {
            Some(pos) => inner.items[pos] = expense,
            None => inner.items.push(expense),
        }
    }

    pub async fn evict(&self, id: &ExpenseId) -> Option<Expense> {
        let mut inner = self.inner.write().await;
        inner.fence();
        let pos = inner.items.iter().position(|e| &e.id == id)?;
        Some(inner.items.remove(pos))
    }

    /// Drops every record and invalidates loads still in flight.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.fence();
        inner.items.clear();
        inner.scope = None;
    }

    pub async fn snapshot(&self) -> Vec<Expense> {
        self.inner.read().await.items.clone()
    }

    /// Runs `f` over the cached records without cloning them.
    pub async fn read<R>(&self, f: impl FnOnce(&[Expense]) -> R) -> R {
        let inner = self.inner.read().await;
        f(&inner.items)
    }

    pub async fn get(&self, id: &ExpenseId) -> Option<Expense> {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|e| &e.id == id)
            .cloned()
    }

    /// Scope of the last applied load; `None` when empty or cleared.
    pub async fn scope(&self) -> Option<Scope> {
        self.inner.read().await.scope
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Amount, ExpenseStatus};

    use super::*;

    fn expense(id: &str, status: ExpenseStatus) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount: Amount::from_cents(500),
            category: "Food".to_string(),
            description: "Lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status,
            submitted_by: None,
        }
    }

    #[tokio::test]
    async fn load_replaces_whole_content() {
        let store = ExpenseStore::new();
        let t1 = store.begin_load(Scope::Mine).await;
        assert!(store.apply_load(t1, vec![expense("a", ExpenseStatus::Pending)]).await);

        let t2 = store.begin_load(Scope::Mine).await;
        assert!(
            store
                .apply_load(t2, vec![expense("b", ExpenseStatus::Pending), expense("c", ExpenseStatus::Approved)])
                .await
        );

        let ids: Vec<String> = store.snapshot().await.into_iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(store.scope().await, Some(Scope::Mine));
    }

    #[tokio::test]
    async fn older_response_arriving_late_is_discarded() {
        let store = ExpenseStore::new();
        let older = store.begin_load(Scope::All).await;
        let newer = store.begin_load(Scope::All).await;

        assert!(store.apply_load(newer, vec![expense("new", ExpenseStatus::Pending)]).await);
        assert!(!store.apply_load(older, vec![expense("old", ExpenseStatus::Pending)]).await);

        assert_eq!(store.len().await, 1);
        assert!(store.get(&ExpenseId::new("new")).await.is_some());
    }

    #[tokio::test]
    async fn clear_invalidates_in_flight_loads() {
        let store = ExpenseStore::new();
        let ticket = store.begin_load(Scope::Mine).await;
        store.clear().await;

        assert!(!store.apply_load(ticket, vec![expense("a", ExpenseStatus::Pending)]).await);
        assert!(store.is_empty().await);
        assert_eq!(store.scope().await, None);
    }

    #[tokio::test]
    async fn load_issued_before_a_mutation_is_stale() {
        let store = ExpenseStore::new();
        let first = store.begin_load(Scope::All).await;
        store.apply_load(first, vec![expense("a", ExpenseStatus::Pending)]).await;

        let in_flight = store.begin_load(Scope::All).await;
        store.upsert(expense("a", ExpenseStatus::Approved)).await;
        assert!(!store.apply_load(in_flight, vec![expense("a", ExpenseStatus::Pending)]).await);

        let cached = store.get(&ExpenseId::new("a")).await.unwrap();
        assert_eq!(cached.status, ExpenseStatus::Approved);
    }

    #[tokio::test]
    async fn upsert_and_evict_single_records() {
        let store = ExpenseStore::new();
        store.upsert(expense("a", ExpenseStatus::Pending)).await;
        store.upsert(expense("b", ExpenseStatus::Pending)).await;
        store.upsert(expense("a", ExpenseStatus::Rejected)).await;
        assert_eq!(store.len().await, 2);

        let removed = store.evict(&ExpenseId::new("b")).await;
        assert_eq!(removed.map(|e| e.id), Some(ExpenseId::new("b")));
        assert!(store.evict(&ExpenseId::new("zzz")).await.is_none());

        let pending = store.read(|items| items.iter().filter(|e| e.is_pending()).count()).await;
        assert_eq!(pending, 0);
    }
}
