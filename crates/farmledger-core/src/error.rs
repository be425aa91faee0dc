use farmledger_domain::DateWindowError;
use thiserror::Error;

use crate::availability::AvailabilityShortfall;

/// Unified error type for ledger operations.
///
/// I/O failures are never retried inside the core; retry and backoff policy
/// belongs to the caller. Every variant carries enough structure for a
/// specific user-facing message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The request never completed. Connection refused, timeout, DNS.
    #[error("network error: {0}")]
    Network(String),
    /// Credential missing or expired. Propagated for re-authentication,
    /// never silently retried.
    #[error("unauthorized: authentication token missing or expired")]
    Unauthorized,
    /// The backend rejected the payload. Field messages are surfaced
    /// verbatim, joined only for display.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// The client-side availability gate rejected a proposed sale.
    #[error(transparent)]
    AvailabilityExceeded(#[from] AvailabilityShortfall),
    /// An aggregation range had inverted or missing bounds.
    #[error("empty range: both start and end dates are required, start first")]
    EmptyRange,
}

impl From<DateWindowError> for CoreError {
    fn from(_: DateWindowError) -> Self {
        CoreError::EmptyRange
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_join_for_display() {
        let err = CoreError::Validation(vec![
            "quantity_sold: must be positive".to_string(),
            "sale_date: this field is required".to_string(),
        ]);
        let rendered = err.to_string();
        assert!(rendered.contains("must be positive"));
        assert!(rendered.contains("; "));
    }
}
