//! Response envelopes shared by every operation.

use serde::{Deserialize, Serialize};

use super::bill::BillDetail;
use super::search::{SearchCandidate, SearchResultShape, SearchResultSummary};

/// Envelope status value for a successful call.
pub const STATUS_OK: &str = "OK";

/// Error detail the API attaches when `status` is `ERROR`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Alert {
    pub message: Option<String>,
}

/// Response of the `getSearch` operation.
///
/// `searchresult` is kept as raw JSON: its container shape varies between
/// API versions, see [`SearchResultShape`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub searchresult: serde_json::Value,
}

impl SearchResponse {
    pub fn shape(&self) -> SearchResultShape<'_> {
        SearchResultShape::classify(&self.searchresult)
    }

    /// Result records in API order. Records that do not look like a search
    /// result are dropped.
    pub fn candidates(&self) -> Vec<SearchCandidate> {
        self.shape().candidates()
    }

    /// The `summary` block (paging and counts), if the response carries one.
    pub fn summary(&self) -> Option<SearchResultSummary> {
        let summary = self.searchresult.get("summary")?;
        serde_json::from_value(summary.clone()).ok()
    }
}

/// Response of the `getBill` operation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BillResponse {
    pub status: String,
    pub bill: Option<BillDetail>,
}
