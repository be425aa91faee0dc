//! Pure, deterministic grouping and summation over dated entries.
//!
//! Everything here is free of I/O and hidden state: the same input always
//! yields the same output. Sums accumulate unrounded in f64; callers round
//! at presentation time only, so repeated aggregation never compounds
//! rounding error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use farmledger_domain::{DatedEntry, DateWindow, ProductionEntry, SaleEntry};

/// One day's summed amount for a single series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// One day's production/consumption balance. Derived, never persisted;
/// stale the moment any write lands.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total_produced: f64,
    pub total_consumed: f64,
    pub available: f64,
}

/// Groups entries by calendar day and sums `amount` per group, ascending
/// by date. Dates are canonical [`NaiveDate`] values parsed at the serde
/// boundary, so equal days always merge regardless of the wire spelling.
pub fn group_by_day<T, F>(entries: &[T], amount: F) -> Vec<DailyTotal>
where
    T: DatedEntry,
    F: Fn(&T) -> f64,
{
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in entries {
        *buckets.entry(entry.date()).or_insert(0.0) += amount(entry);
    }
    buckets
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Sums `amount` over the entries satisfying `predicate`.
pub fn sum_where<T, P, F>(entries: &[T], predicate: P, amount: F) -> f64
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> f64,
{
    entries
        .iter()
        .filter(|entry| predicate(entry))
        .map(|entry| amount(entry))
        .sum()
}

/// Total for a single calendar day.
pub fn total_on<T, F>(entries: &[T], date: NaiveDate, amount: F) -> f64
where
    T: DatedEntry,
    F: Fn(&T) -> f64,
{
    sum_where(entries, |entry| entry.date() == date, amount)
}

/// Total for the calendar month containing `reference`, first day through
/// last day inclusive.
pub fn total_in_month<T, F>(entries: &[T], reference: NaiveDate, amount: F) -> f64
where
    T: DatedEntry,
    F: Fn(&T) -> f64,
{
    let window = DateWindow::month_of(reference);
    sum_where(entries, |entry| window.contains(entry.date()), amount)
}

/// Total for an inclusive `[start, end]` range. Both bounds are required:
/// an absent bound yields 0, never the full-dataset sum.
pub fn total_in_range<T, F>(
    entries: &[T],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    amount: F,
) -> f64
where
    T: DatedEntry,
    F: Fn(&T) -> f64,
{
    let (Some(start), Some(end)) = (start, end) else {
        return 0.0;
    };
    let Ok(window) = DateWindow::new(start, end) else {
        return 0.0;
    };
    sum_where(entries, |entry| window.contains(entry.date()), amount)
}

/// Merges production and sales into a per-day balance series, ascending by
/// date. Days appearing in either series appear in the output.
pub fn daily_balance(production: &[ProductionEntry], sales: &[SaleEntry]) -> Vec<DailyAggregate> {
    let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for record in production {
        buckets.entry(record.date).or_insert((0.0, 0.0)).0 += record.quantity();
    }
    for sale in sales {
        buckets.entry(sale.date).or_insert((0.0, 0.0)).1 += sale.quantity;
    }
    buckets
        .into_iter()
        .map(|(date, (produced, consumed))| DailyAggregate {
            date,
            total_produced: produced,
            total_consumed: consumed,
            available: produced - consumed,
        })
        .collect()
}
