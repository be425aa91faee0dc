//! Bounded-query filter shared by every fetch operation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseCategory;

/// Narrowing criteria for a ledger fetch. An empty filter means the full
/// collection, bounded only by whatever the backend returns.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only meaningful for expense fetches; ignored elsewhere.
    pub category: Option<ExpenseCategory>,
}

impl EntryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn in_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.category.is_none()
    }

    /// Whether a dated record passes the date bounds of this filter.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = EntryFilter::all();
        assert!(filter.is_empty());
        assert!(filter.matches_date(date(1990, 1, 1)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let filter = EntryFilter::all()
            .from(date(2024, 2, 1))
            .until(date(2024, 2, 29));
        assert!(filter.matches_date(date(2024, 2, 1)));
        assert!(filter.matches_date(date(2024, 2, 29)));
        assert!(!filter.matches_date(date(2024, 3, 1)));
        assert!(!filter.matches_date(date(2024, 1, 31)));
    }
}
