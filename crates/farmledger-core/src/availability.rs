//! Advisory availability check for proposed milk sales.
//!
//! The check gates a sale against same-day cumulative production minus
//! same-day cumulative sales. It is a fast, offline-computable UX gate:
//! the backend's response to the actual submission remains authoritative,
//! and two concurrent sessions can both pass this check before either
//! write lands. That race is accepted here; closing it requires an atomic
//! check on the server side.

use chrono::NaiveDate;
use farmledger_domain::{ProductionEntry, SaleEntry};
use thiserror::Error;

use crate::aggregate::total_on;

/// Production/consumption balance for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAvailability {
    pub total_produced: f64,
    pub total_consumed: f64,
    pub available: f64,
}

/// Why a proposed sale was rejected by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "cannot sell {requested:.2} L on {date}: produced {total_produced:.2} L, \
     already sold {total_consumed:.2} L, {available:.2} L remaining"
)]
pub struct AvailabilityShortfall {
    pub date: NaiveDate,
    pub requested: f64,
    pub available: f64,
    pub total_produced: f64,
    pub total_consumed: f64,
}

/// Outcome of the availability gate for one proposed sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvailabilityVerdict {
    Approved { available: f64 },
    Rejected(AvailabilityShortfall),
}

impl AvailabilityVerdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, AvailabilityVerdict::Approved { .. })
    }
}

/// Computes the balance for `date` over already-fetched entries.
///
/// No production for the date means `available == 0`; missing data is never
/// treated as unlimited.
pub fn availability_on(
    date: NaiveDate,
    production: &[ProductionEntry],
    sales: &[SaleEntry],
) -> DailyAvailability {
    let total_produced = total_on(production, date, ProductionEntry::quantity);
    let total_consumed = total_on(sales, date, |sale| sale.quantity);
    DailyAvailability {
        total_produced,
        total_consumed,
        available: total_produced - total_consumed,
    }
}

/// Gates a proposed quantity against the day's balance. Rejects when the
/// quantity exceeds what remains, or is not strictly positive.
pub fn check_sale(
    date: NaiveDate,
    requested: f64,
    production: &[ProductionEntry],
    sales: &[SaleEntry],
) -> AvailabilityVerdict {
    let balance = availability_on(date, production, sales);
    if requested <= 0.0 || requested > balance.available {
        return AvailabilityVerdict::Rejected(AvailabilityShortfall {
            date,
            requested,
            available: balance.available,
            total_produced: balance.total_produced,
            total_consumed: balance.total_consumed,
        });
    }
    AvailabilityVerdict::Approved {
        available: balance.available,
    }
}
