//! Domain model for milk production records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{flexible_f64, DatedEntry, EntryId, Identifiable};

/// A single day's milking record for one cow.
///
/// Immutable once created; the backend offers no update path and the client
/// never edits fetched records in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionEntry {
    pub id: EntryId,
    #[serde(default)]
    pub cow: Option<EntryId>,
    pub date: NaiveDate,
    #[serde(deserialize_with = "flexible_f64")]
    pub morning_amount: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub evening_amount: f64,
}

impl ProductionEntry {
    /// Total liters produced that day (morning plus evening milking).
    pub fn quantity(&self) -> f64 {
        self.morning_amount + self.evening_amount
    }
}

impl Identifiable for ProductionEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

impl DatedEntry for ProductionEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
