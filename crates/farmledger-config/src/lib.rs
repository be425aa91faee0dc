//! farmledger-config
//!
//! Persistent user preferences for the farm-ledger tools: API endpoint,
//! display locale and currency, default expense category. Owns the Config
//! data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
