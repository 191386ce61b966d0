//! Projection of a bill detail record into the two rows the session keeps.

use legiscan_api::types::BillDetail;
use serde::{Deserialize, Serialize};

pub const DEMOCRAT: &str = "D";
pub const REPUBLICAN: &str = "R";

/// Identity, last action and session bounds of a tracked bill.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FlatRecord {
    pub bill_id: Option<i64>,
    pub state: Option<String>,
    pub bill_number: Option<String>,
    pub title: Option<String>,
    pub last_action: Option<String>,
    pub last_action_date: Option<String>,
    pub session_start: Option<i32>,
    pub session_end: Option<i32>,
}

/// Dashboard row for a tracked bill: sponsor tallies and completion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SummaryRecord {
    pub state: Option<String>,
    pub bill_number: Option<String>,
    pub title: Option<String>,
    pub dem_sponsors: u32,
    pub rep_sponsors: u32,
    pub session_start: Option<i32>,
    pub session_end: Option<i32>,
    pub last_action_date: Option<String>,
    pub last_action: Option<String>,
    pub completed: Option<i64>,
}

/// Splits a bill detail into its flat and summary rows.
pub fn project(bill: &BillDetail) -> (FlatRecord, SummaryRecord) {
    let session_start = bill.session.as_ref().and_then(|s| s.year_start);
    let session_end = bill.session.as_ref().and_then(|s| s.year_end);

    let count_party = |code: &str| {
        bill.sponsors
            .iter()
            .filter(|s| s.party_code() == Some(code))
            .count() as u32
    };

    let flat = FlatRecord {
        bill_id: bill.bill_id,
        state: bill.state.clone(),
        bill_number: bill.bill_number.clone(),
        title: bill.title.clone(),
        last_action: bill.last_action.clone(),
        last_action_date: bill.last_action_date.clone(),
        session_start,
        session_end,
    };
    let summary = SummaryRecord {
        state: bill.state.clone(),
        bill_number: bill.bill_number.clone(),
        title: bill.title.clone(),
        dem_sponsors: count_party(DEMOCRAT),
        rep_sponsors: count_party(REPUBLICAN),
        session_start,
        session_end,
        last_action_date: bill.last_action_date.clone(),
        last_action: bill.last_action.clone(),
        completed: bill.completed,
    };
    (flat, summary)
}
