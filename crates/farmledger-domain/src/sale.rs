//! Domain model for milk sale records and sale drafts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{flexible_f64, DatedEntry, EntryId, Identifiable, ServerAmount};

/// A persisted milk sale as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleEntry {
    pub id: EntryId,
    /// Same-day production record the backend links this sale to. Integration
    /// detail of the store; the availability invariant itself is enforced at
    /// the date-bucket level, not per row.
    #[serde(default)]
    pub milk_record: Option<EntryId>,
    #[serde(rename = "sale_date")]
    pub date: NaiveDate,
    #[serde(rename = "quantity_sold", deserialize_with = "flexible_f64")]
    pub quantity: f64,
    #[serde(rename = "price_per_liter", deserialize_with = "flexible_f64")]
    pub unit_price: f64,
    /// `quantity × unit_price` as computed by the backend; authoritative.
    #[serde(rename = "total_sale_amount")]
    pub total_amount: ServerAmount,
}

impl SaleEntry {
    /// Locally recomputed total for reconciliation views.
    ///
    /// Deliberately a separate call from [`SaleEntry::total_amount`]; display
    /// code must not substitute this for the server figure.
    pub fn recomputed_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

impl Identifiable for SaleEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

impl DatedEntry for SaleEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A sale awaiting submission. Serializes to the backend's POST body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaleDraft {
    #[serde(rename = "sale_date")]
    pub date: NaiveDate,
    #[serde(rename = "quantity_sold")]
    pub quantity: f64,
    #[serde(rename = "price_per_liter")]
    pub unit_price: f64,
    #[serde(rename = "milk_record", skip_serializing_if = "Option::is_none")]
    pub linked_production: Option<EntryId>,
}

impl SaleDraft {
    pub fn new(date: NaiveDate, quantity: f64, unit_price: f64) -> Self {
        Self {
            date,
            quantity,
            unit_price,
            linked_production: None,
        }
    }

    pub fn with_linked_production(mut self, id: EntryId) -> Self {
        self.linked_production = Some(id);
        self
    }
}
