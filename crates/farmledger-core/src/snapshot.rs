//! Short-lived in-memory projection of the remote ledger.

use chrono::NaiveDate;
use farmledger_domain::{EntryFilter, EntryId, ProductionEntry, SaleDraft, SaleEntry};
use tracing::{debug, info};

use crate::aggregate::{daily_balance, total_in_month, total_in_range, total_on, DailyAggregate};
use crate::availability::{availability_on, check_sale, AvailabilityVerdict, DailyAvailability};
use crate::store::LedgerStore;
use crate::CoreError;

/// A non-authoritative read-through view of production and sales.
///
/// The snapshot exists for one render/request cycle: load it, derive
/// aggregates, optionally gate and submit a write, then discard it and
/// re-fetch. It is stale the moment any write lands anywhere, including a
/// concurrent session's. Single logical writer assumed; there is no
/// locking or optimistic concurrency here.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub production: Vec<ProductionEntry>,
    pub sales: Vec<SaleEntry>,
}

impl LedgerSnapshot {
    pub fn new(production: Vec<ProductionEntry>, sales: Vec<SaleEntry>) -> Self {
        Self { production, sales }
    }

    /// Fetches both collections in parallel and joins them before any
    /// aggregation runs.
    pub async fn load(store: &dyn LedgerStore, filter: &EntryFilter) -> Result<Self, CoreError> {
        let (production, sales) =
            tokio::try_join!(store.fetch_production(filter), store.fetch_sales(filter))?;
        debug!(
            production = production.len(),
            sales = sales.len(),
            "ledger snapshot loaded"
        );
        Ok(Self::new(production, sales))
    }

    /// Per-day production/consumption balance, ascending by date.
    pub fn daily_aggregates(&self) -> Vec<DailyAggregate> {
        daily_balance(&self.production, &self.sales)
    }

    pub fn availability_on(&self, date: NaiveDate) -> DailyAvailability {
        availability_on(date, &self.production, &self.sales)
    }

    /// Runs the advisory gate for a draft without submitting it.
    pub fn validate_sale(&self, draft: &SaleDraft) -> AvailabilityVerdict {
        check_sale(draft.date, draft.quantity, &self.production, &self.sales)
    }

    /// Revenue from sales on `date`, using the server-reported totals.
    pub fn revenue_on(&self, date: NaiveDate) -> f64 {
        total_on(&self.sales, date, |sale| sale.total_amount.value())
    }

    /// Revenue for the month containing `reference`.
    pub fn revenue_in_month(&self, reference: NaiveDate) -> f64 {
        total_in_month(&self.sales, reference, |sale| sale.total_amount.value())
    }

    /// Revenue for an inclusive range; 0 unless both bounds are given.
    pub fn revenue_in_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> f64 {
        total_in_range(&self.sales, start, end, |sale| sale.total_amount.value())
    }

    /// Id of a production record on `date`, if any. The backend requires
    /// this linkage on sale rows.
    pub fn linked_production(&self, date: NaiveDate) -> Option<EntryId> {
        self.production
            .iter()
            .find(|record| record.date == date)
            .map(|record| record.id)
    }

    /// Gates `draft` against this snapshot, fills in the production
    /// linkage, and submits on approval.
    ///
    /// The gate is advisory and races with concurrent sessions; the
    /// backend's answer is authoritative. On success the snapshot is stale:
    /// the submitted entry is deliberately not merged in, and the caller
    /// must re-fetch to observe the write.
    pub async fn submit_sale(
        &self,
        store: &dyn LedgerStore,
        draft: SaleDraft,
    ) -> Result<SaleEntry, CoreError> {
        match self.validate_sale(&draft) {
            AvailabilityVerdict::Rejected(shortfall) => {
                info!(%shortfall, "sale rejected by availability gate");
                Err(CoreError::AvailabilityExceeded(shortfall))
            }
            AvailabilityVerdict::Approved { available } => {
                debug!(date = %draft.date, requested = draft.quantity, available, "sale approved by gate");
                let draft = match self.linked_production(draft.date) {
                    Some(id) if draft.linked_production.is_none() => {
                        draft.with_linked_production(id)
                    }
                    _ => draft,
                };
                store.submit_sale(&draft).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmledger_domain::{EntryId, ServerAmount};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> LedgerSnapshot {
        let day = date(2024, 2, 1);
        LedgerSnapshot::new(
            vec![ProductionEntry {
                id: EntryId(7),
                cow: Some(EntryId(2)),
                date: day,
                morning_amount: 6.0,
                evening_amount: 4.0,
            }],
            vec![SaleEntry {
                id: EntryId(12),
                milk_record: Some(EntryId(7)),
                date: day,
                quantity: 3.0,
                unit_price: 55.0,
                total_amount: ServerAmount::reported(165.0),
            }],
        )
    }

    #[test]
    fn aggregates_and_availability_agree() {
        let snap = snapshot();
        let day = date(2024, 2, 1);
        let aggregates = snap.daily_aggregates();
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].available, 7.0);
        assert_eq!(snap.availability_on(day).available, 7.0);
    }

    #[test]
    fn revenue_uses_server_totals() {
        let snap = snapshot();
        assert_eq!(snap.revenue_on(date(2024, 2, 1)), 165.0);
        assert_eq!(snap.revenue_in_range(None, Some(date(2024, 2, 1))), 0.0);
    }

    #[test]
    fn linked_production_finds_same_day_record() {
        let snap = snapshot();
        assert_eq!(snap.linked_production(date(2024, 2, 1)), Some(EntryId(7)));
        assert_eq!(snap.linked_production(date(2024, 2, 2)), None);
    }
}
