//! Shared identifiers, traits, and date utilities for ledger entries.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the backend store.
///
/// The client never generates ids; every `EntryId` originates in a server
/// response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exposes the backend-assigned identifier of a persisted entry.
pub trait Identifiable {
    fn id(&self) -> EntryId;
}

/// Exposes the calendar date an entry is bucketed under.
pub trait DatedEntry {
    fn date(&self) -> NaiveDate;
}

/// A monetary total computed by the backend.
///
/// Kept distinct from any locally recomputed figure so display code cannot
/// silently substitute one for the other. The server value is authoritative.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ServerAmount(f64);

impl ServerAmount {
    /// Wraps a total as reported by the backend. Use only for values that
    /// genuinely came from a server response (or a test double standing in
    /// for one); locally derived figures stay plain `f64`.
    pub fn reported(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for ServerAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        flexible_f64(deserializer).map(ServerAmount)
    }
}

impl fmt::Display for ServerAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Deserializes an f64 from either a JSON number or a decimal string.
///
/// The backend serializes decimal fields as strings ("12.50") while plain
/// floats arrive as numbers; both forms appear in the same collections.
pub fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid decimal string `{raw}`"))),
    }
}

/// An inclusive `[start, end]` reporting window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Builds a window, rejecting inverted bounds. A single-day window
    /// (`start == end`) is valid.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end < start {
            return Err(DateWindowError::InvertedRange);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The calendar month containing `reference`, first day through last day.
    pub fn month_of(reference: NaiveDate) -> Self {
        let start = reference
            .with_day(1)
            .unwrap_or(reference);
        let end = last_day_of_month(reference.year(), reference.month());
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvertedRange,
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvertedRange => {
                f.write_str("date window end must not precede start")
            }
        }
    }
}

impl std::error::Error for DateWindowError {}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| first_next - Duration::days(1))
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day_window_is_valid() {
        let day = date(2024, 3, 15);
        let window = DateWindow::new(day, day).expect("single-day window");
        assert!(window.contains(day));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = DateWindow::new(date(2024, 3, 15), date(2024, 3, 14)).unwrap_err();
        assert_eq!(err, DateWindowError::InvertedRange);
    }

    #[test]
    fn month_window_covers_leap_february() {
        let window = DateWindow::month_of(date(2024, 2, 10));
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
    }

    #[test]
    fn month_window_excludes_neighbouring_days() {
        let window = DateWindow::month_of(date(2024, 1, 31));
        assert!(window.contains(date(2024, 1, 31)));
        assert!(!window.contains(date(2024, 2, 1)));
    }
}
