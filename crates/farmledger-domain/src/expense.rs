//! Domain model for farm expense records and expense drafts.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{flexible_f64, DatedEntry, EntryId, Identifiable};

/// Canonical expense categories, matching the backend's constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Wages,
    Feeds,
    VeterinaryServices,
    FarmTools,
    Maintenance,
    Transport,
    Utilities,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Wages,
        ExpenseCategory::Feeds,
        ExpenseCategory::VeterinaryServices,
        ExpenseCategory::FarmTools,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Transport,
        ExpenseCategory::Utilities,
        ExpenseCategory::Other,
    ];

    /// Wire constant as the backend expects it in query parameters.
    pub fn wire_name(self) -> &'static str {
        match self {
            ExpenseCategory::Wages => "WAGES",
            ExpenseCategory::Feeds => "FEEDS",
            ExpenseCategory::VeterinaryServices => "VETERINARY_SERVICES",
            ExpenseCategory::FarmTools => "FARM_TOOLS",
            ExpenseCategory::Maintenance => "MAINTENANCE",
            ExpenseCategory::Transport => "TRANSPORT",
            ExpenseCategory::Utilities => "UTILITIES",
            ExpenseCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Wages => "Wages",
            ExpenseCategory::Feeds => "Feeds",
            ExpenseCategory::VeterinaryServices => "Veterinary Services",
            ExpenseCategory::FarmTools => "Farm Tools",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|category| category.wire_name() == normalized)
            .ok_or_else(|| format!("unknown expense category `{value}`"))
    }
}

/// A persisted expense as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub id: EntryId,
    pub category: ExpenseCategory,
    #[serde(rename = "expense_date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "flexible_f64")]
    pub amount: f64,
    /// Worker the payment went to; the backend requires this for WAGES.
    #[serde(default)]
    pub worker_paid: Option<EntryId>,
}

impl Identifiable for ExpenseEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

impl DatedEntry for ExpenseEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// An expense awaiting submission. Serializes to the backend's POST body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpenseDraft {
    pub category: ExpenseCategory,
    #[serde(rename = "expense_date")]
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_paid: Option<EntryId>,
}

impl ExpenseDraft {
    pub fn new(category: ExpenseCategory, date: NaiveDate, amount: f64) -> Self {
        Self {
            category,
            date,
            amount,
            worker_paid: None,
        }
    }

    pub fn paid_to(mut self, worker: EntryId) -> Self {
        self.worker_paid = Some(worker);
        self
    }

    /// Client-side pre-checks mirroring the backend's field rules. Advisory:
    /// the server response remains authoritative.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        if self.amount <= 0.0 {
            problems.push("amount must be a positive number".to_string());
        }
        if self.category == ExpenseCategory::Wages && self.worker_paid.is_none() {
            problems.push("worker_paid is required for WAGES expenses".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn category_round_trips_wire_constants() {
        for category in ExpenseCategory::ALL {
            let json = serde_json::to_string(&category).expect("serializable");
            assert_eq!(json, format!("\"{}\"", category.wire_name()));
            let back: ExpenseCategory = serde_json::from_str(&json).expect("deserializable");
            assert_eq!(back, category);
        }
    }

    #[test]
    fn category_parses_human_labels() {
        assert_eq!(
            "veterinary services".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::VeterinaryServices
        );
        assert!("fuel".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn deserializes_backend_expense_payload() {
        let json = r#"{
            "id": 4,
            "category": "FEEDS",
            "expense_date": "2024-02-03",
            "amount": "1500.00"
        }"#;
        let expense: ExpenseEntry = serde_json::from_str(json).expect("valid payload");
        assert_eq!(expense.category, ExpenseCategory::Feeds);
        assert_eq!(expense.amount, 1500.0);
        assert_eq!(expense.worker_paid, None);
    }

    #[test]
    fn wages_draft_requires_worker() {
        let draft = ExpenseDraft::new(ExpenseCategory::Wages, date(2024, 2, 3), 500.0);
        let problems = draft.validate().unwrap_err();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("worker_paid"));

        let paid = draft.paid_to(EntryId(9));
        assert!(paid.validate().is_ok());
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let draft = ExpenseDraft::new(ExpenseCategory::Other, date(2024, 2, 3), 0.0);
        assert!(draft.validate().is_err());
    }
}
