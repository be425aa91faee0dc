//! farmledger-core
//!
//! Business logic for the farm ledger: per-day aggregation, the advisory
//! milk-availability check, and the read-through snapshot over a remote
//! store. Depends on farmledger-domain. No HTTP, no terminal I/O; the
//! [`LedgerStore`] trait is implemented by backend crates.

pub mod aggregate;
pub mod availability;
pub mod error;
pub mod snapshot;
pub mod store;

pub use aggregate::*;
pub use availability::*;
pub use error::CoreError;
pub use snapshot::*;
pub use store::*;
