//! Library layer for the bill tracker: bill number normalisation, cached API
//! access, bill lookup, projection and per-session state.
//!
//! Wraps the `legiscan_api` crate with an in-memory TTL cache, input
//! validation and the actions an interactive session performs.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod jurisdiction;
pub mod normalize;
pub mod projection;
pub mod search;
pub mod session;
pub mod tracker;
pub mod validation;

pub use legiscan_api;
pub use legiscan_api::types;
pub use legiscan_api::{BillQuery, Query, SearchQuery, ALL_YEARS};

pub use client::CachedClient;
pub use config::ApiConfig;
pub use error::BillTrackerError;
pub use jurisdiction::{Jurisdiction, JURISDICTIONS};
pub use normalize::{BillNormalizer, NormalizerError};
pub use projection::{project, FlatRecord, SummaryRecord};
pub use search::{BillSearcher, KeywordResult};
pub use session::{Kpis, PartyTotals, SessionStore, SummaryView, TimelineRow};
pub use tracker::{AddedBill, Tracker};
