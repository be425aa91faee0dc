//! The boundary between core logic and a remote ledger backend.

use async_trait::async_trait;
use farmledger_domain::{
    EntryFilter, ExpenseDraft, ExpenseEntry, ProductionEntry, SaleDraft, SaleEntry,
};

use crate::CoreError;

/// Abstraction over the remote store owning all persisted entries.
///
/// Contract, shared by every implementation:
/// - fetches are bounded by `filter`; an empty filter returns whatever the
///   backend considers the full collection;
/// - submissions persist remotely and never mutate any local cache. The
///   caller re-fetches to observe its own write (explicit invalidation);
/// - no operation retries internally; failures surface as typed
///   [`CoreError`] values and retry policy stays with the caller;
/// - a fetch may be abandoned by dropping its future, but an in-flight
///   submission must be awaited: an abandoned write's outcome is unknown
///   and can only be reconciled by a later re-fetch, never assumed failed.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn fetch_production(&self, filter: &EntryFilter)
        -> Result<Vec<ProductionEntry>, CoreError>;

    async fn fetch_sales(&self, filter: &EntryFilter) -> Result<Vec<SaleEntry>, CoreError>;

    async fn fetch_expenses(&self, filter: &EntryFilter) -> Result<Vec<ExpenseEntry>, CoreError>;

    /// Persists a sale. The backend re-validates and remains the final
    /// authority; it may still reject a sale that passed the client gate.
    async fn submit_sale(&self, draft: &SaleDraft) -> Result<SaleEntry, CoreError>;

    async fn submit_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseEntry, CoreError>;
}
