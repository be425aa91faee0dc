use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the ledger tools.
///
/// Unknown fields are ignored and missing fields fall back to defaults, so
/// older config files keep loading after upgrades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Wire name of the category pre-selected in expense forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_expense_category: Option<String>,
    /// Per-request timeout override, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            default_expense_category: None,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn default_api_base_url() -> String {
        "http://localhost:8000/api".into()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "KSH".into()
    }
}
