//! farmledger-domain
//!
//! Pure domain models for the farm ledger (production, sales, expenses,
//! date windows, filters). No I/O, no HTTP, no storage. Only data types
//! and the serde mapping onto the backend's wire format.

pub mod common;
pub mod expense;
pub mod filter;
pub mod production;
pub mod sale;

pub use common::*;
pub use expense::*;
pub use filter::*;
pub use production::*;
pub use sale::*;
