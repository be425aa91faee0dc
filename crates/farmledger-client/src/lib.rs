//! farmledger-client
//!
//! HTTP implementation of [`LedgerStore`] against the farm-management REST
//! backend. Owns session credentials explicitly; nothing here reads
//! ambient or global state.

use std::time::Duration;

use async_trait::async_trait;
use farmledger_core::{CoreError, LedgerStore};
use farmledger_domain::{
    EntryFilter, ExpenseDraft, ExpenseEntry, ProductionEntry, SaleDraft, SaleEntry,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const PRODUCTION_PATH: &str = "milk-production/";
const SALES_PATH: &str = "milk-sales/";
const EXPENSES_PATH: &str = "expenses/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

/// Explicit session handed in by the caller's auth layer: API base URL plus
/// a bearer token. Replaces the ambient token storage of the original UI.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    token: String,
}

impl Session {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: token.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Bearer-authenticated ledger store over HTTP.
///
/// No retries: a failed request surfaces as a typed error and the caller
/// decides on backoff. Writes are persisted server-side only; callers
/// re-fetch to observe them.
pub struct HttpLedgerStore {
    http: reqwest::Client,
    session: Session,
}

impl HttpLedgerStore {
    pub fn new(session: Session) -> Result<Self, CoreError> {
        Self::with_timeout(session, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(session: Session, timeout: Duration) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CoreError::Network(err.to_string()))?;
        Ok(Self { http, session })
    }

    async fn get_list<T>(&self, path: &str, filter: &EntryFilter) -> Result<Vec<T>, CoreError>
    where
        T: DeserializeOwned,
    {
        let url = self.session.endpoint(path);
        debug!(%url, "fetching collection");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.session.token)
            .query(&filter_query(filter))
            .send()
            .await
            .map_err(request_error)?;
        decode_response(response).await
    }

    async fn post_entry<B, T>(&self, path: &str, body: &B) -> Result<T, CoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.session.endpoint(path);
        debug!(%url, "submitting entry");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.session.token)
            .json(body)
            .send()
            .await
            .map_err(request_error)?;
        decode_response(response).await
    }
}

#[async_trait]
impl LedgerStore for HttpLedgerStore {
    async fn fetch_production(
        &self,
        filter: &EntryFilter,
    ) -> Result<Vec<ProductionEntry>, CoreError> {
        self.get_list(PRODUCTION_PATH, filter).await
    }

    async fn fetch_sales(&self, filter: &EntryFilter) -> Result<Vec<SaleEntry>, CoreError> {
        self.get_list(SALES_PATH, filter).await
    }

    async fn fetch_expenses(&self, filter: &EntryFilter) -> Result<Vec<ExpenseEntry>, CoreError> {
        self.get_list(EXPENSES_PATH, filter).await
    }

    async fn submit_sale(&self, draft: &SaleDraft) -> Result<SaleEntry, CoreError> {
        self.post_entry(SALES_PATH, draft).await
    }

    async fn submit_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseEntry, CoreError> {
        self.post_entry(EXPENSES_PATH, draft).await
    }
}

fn filter_query(filter: &EntryFilter) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(start) = filter.start_date {
        pairs.push(("start_date", start.format(DATE_PARAM_FORMAT).to_string()));
    }
    if let Some(end) = filter.end_date {
        pairs.push(("end_date", end.format(DATE_PARAM_FORMAT).to_string()));
    }
    if let Some(category) = filter.category {
        pairs.push(("category", category.wire_name().to_string()));
    }
    pairs
}

fn request_error(err: reqwest::Error) -> CoreError {
    CoreError::Network(err.to_string())
}

async fn decode_response<T>(response: reqwest::Response) -> Result<T, CoreError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|err| {
            CoreError::Network(format!("failed to decode response body: {err}"))
        });
    }

    let body = response.text().await.unwrap_or_default();
    warn!(%status, "backend returned an error response");
    Err(error_from_status(status, &body))
}

/// Maps an HTTP error status plus body onto the core taxonomy. Validation
/// messages are surfaced verbatim; nothing is re-interpreted beyond
/// flattening the body for display.
fn error_from_status(status: StatusCode, body: &str) -> CoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::Unauthorized,
        StatusCode::BAD_REQUEST => CoreError::Validation(flatten_messages(body)),
        _ => CoreError::Network(format!("server responded {status}: {}", body.trim())),
    }
}

/// Flattens a backend error body into display messages. Handles the
/// `{"field": ["msg", ...]}` shape, `{"detail": "msg"}`, bare lists, and
/// falls back to the raw body.
fn flatten_messages(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return vec![body.trim().to_string()];
    };
    let mut messages = Vec::new();
    collect_messages(None, &value, &mut messages);
    if messages.is_empty() {
        messages.push(body.trim().to_string());
    }
    messages
}

fn collect_messages(field: Option<&str>, value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(text) => match field {
            Some(name) => out.push(format!("{name}: {text}")),
            None => out.push(text.clone()),
        },
        serde_json::Value::Array(items) => {
            for item in items {
                collect_messages(field, item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                collect_messages(Some(key), nested, out);
            }
        }
        other => {
            if let Some(name) = field {
                out.push(format!("{name}: {other}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use farmledger_domain::ExpenseCategory;

    #[test]
    fn session_normalizes_trailing_slashes() {
        let session = Session::new("http://localhost:8000/api/", "token");
        assert_eq!(
            session.endpoint(SALES_PATH),
            "http://localhost:8000/api/milk-sales/"
        );
    }

    #[test]
    fn empty_filter_builds_no_query_pairs() {
        assert!(filter_query(&EntryFilter::all()).is_empty());
    }

    #[test]
    fn filter_builds_wire_query_pairs() {
        let filter = EntryFilter::all()
            .from(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .until(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
            .in_category(ExpenseCategory::VeterinaryServices);
        let pairs = filter_query(&filter);
        assert_eq!(
            pairs,
            vec![
                ("start_date", "2024-02-01".to_string()),
                ("end_date", "2024-02-29".to_string()),
                ("category", "VETERINARY_SERVICES".to_string()),
            ]
        );
    }

    #[test]
    fn unauthorized_statuses_map_to_unauthorized() {
        assert!(matches!(
            error_from_status(StatusCode::UNAUTHORIZED, ""),
            CoreError::Unauthorized
        ));
        assert!(matches!(
            error_from_status(StatusCode::FORBIDDEN, ""),
            CoreError::Unauthorized
        ));
    }

    #[test]
    fn field_errors_flatten_verbatim() {
        let body = r#"{
            "quantity_sold": ["Ensure this value is greater than 0."],
            "sale_date": ["This field is required.", "Enter a valid date."]
        }"#;
        let err = error_from_status(StatusCode::BAD_REQUEST, body);
        let CoreError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(messages.len(), 3);
        assert!(messages
            .iter()
            .any(|msg| msg == "quantity_sold: Ensure this value is greater than 0."));
        assert!(messages
            .iter()
            .any(|msg| msg == "sale_date: Enter a valid date."));
    }

    #[test]
    fn detail_errors_flatten_verbatim() {
        let body = r#"{"detail": "No milk production record found for this date."}"#;
        let CoreError::Validation(messages) = error_from_status(StatusCode::BAD_REQUEST, body)
        else {
            panic!("expected validation error");
        };
        assert_eq!(
            messages,
            vec!["detail: No milk production record found for this date.".to_string()]
        );
    }

    #[test]
    fn non_json_bodies_fall_back_to_raw_text() {
        let CoreError::Validation(messages) =
            error_from_status(StatusCode::BAD_REQUEST, "  bad request  ")
        else {
            panic!("expected validation error");
        };
        assert_eq!(messages, vec!["bad request".to_string()]);
    }

    #[test]
    fn server_errors_keep_status_and_body() {
        let err = error_from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let CoreError::Network(message) = err else {
            panic!("expected network error");
        };
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }
}
