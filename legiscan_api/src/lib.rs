//! Typed client for the LegiScan bill-tracking API.
//!
//! Covers the two operations the tracker needs: `getSearch` (full-text and
//! bill-number search) and `getBill` (bill detail with sponsors and session).

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{BillQuery, Query, SearchQuery, ALL_YEARS};
