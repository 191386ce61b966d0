//! In-memory session state and the dashboard views derived from it.
//!
//! Derived values (dates, completion labels, totals) are recomputed from the
//! stored records on every read and never stored.

use chrono::NaiveDate;
use serde::Serialize;

use crate::projection::{FlatRecord, SummaryRecord};
use crate::search::KeywordResult;

pub const COMPLETED_LABEL: &str = "Completed";
pub const NOT_COMPLETED_LABEL: &str = "Not Completed";

impl SummaryRecord {
    pub fn is_completed(&self) -> bool {
        self.completed == Some(1)
    }

    /// January 1st of the session's first year.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.session_start
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    }

    /// The last action date, if it parses as `YYYY-MM-DD`.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.last_action_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    pub fn completion_label(&self) -> &'static str {
        if self.is_completed() {
            COMPLETED_LABEL
        } else {
            NOT_COMPLETED_LABEL
        }
    }

    /// `"TX — HB7"`.
    pub fn label(&self) -> String {
        format!(
            "{} — {}",
            self.state.as_deref().unwrap_or_default(),
            self.bill_number.as_deref().unwrap_or_default()
        )
    }
}

/// A summary row with its derived fields, as shown in the explorer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummaryView {
    #[serde(flatten)]
    pub record: SummaryRecord,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub completion_label: &'static str,
}

impl From<&SummaryRecord> for SummaryView {
    fn from(record: &SummaryRecord) -> Self {
        Self {
            start_date: record.start_date(),
            end_date: record.end_date(),
            completion_label: record.completion_label(),
            record: record.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kpis {
    pub total: usize,
    pub completed: usize,
    pub not_completed: usize,
}

/// Sponsor totals across every tracked bill.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartyTotals {
    pub democrats: u64,
    pub republicans: u64,
}

impl PartyTotals {
    pub fn total(&self) -> u64 {
        self.democrats + self.republicans
    }
}

/// One bar of the timeline chart.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub completion_label: &'static str,
}

/// State of one interactive session.
///
/// `flat` and `summary` are appended together and always index-aligned;
/// pending search results are replaced wholesale.
#[derive(Debug, Default)]
pub struct SessionStore {
    flat: Vec<FlatRecord>,
    summary: Vec<SummaryRecord>,
    search_results: Vec<KeywordResult>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, flat: FlatRecord, summary: SummaryRecord) {
        self.flat.push(flat);
        self.summary.push(summary);
    }

    pub fn replace_search_results(&mut self, results: Vec<KeywordResult>) {
        self.search_results = results;
    }

    /// Drops pending results, returning them.
    pub fn take_search_results(&mut self) -> Vec<KeywordResult> {
        std::mem::take(&mut self.search_results)
    }

    pub fn reset_all(&mut self) {
        self.flat.clear();
        self.summary.clear();
        self.search_results.clear();
    }

    pub fn flat_records(&self) -> &[FlatRecord] {
        &self.flat
    }

    pub fn summary_records(&self) -> &[SummaryRecord] {
        &self.summary
    }

    pub fn search_results(&self) -> &[KeywordResult] {
        &self.search_results
    }

    /// Number of tracked bills.
    pub fn len(&self) -> usize {
        self.summary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    pub fn summary_views(&self) -> Vec<SummaryView> {
        self.summary.iter().map(SummaryView::from).collect()
    }

    pub fn kpis(&self) -> Kpis {
        let completed = self.summary.iter().filter(|r| r.is_completed()).count();
        Kpis {
            total: self.summary.len(),
            completed,
            not_completed: self.summary.len() - completed,
        }
    }

    pub fn party_totals(&self) -> PartyTotals {
        self.summary
            .iter()
            .fold(PartyTotals::default(), |mut totals, r| {
                totals.democrats += u64::from(r.dem_sponsors);
                totals.republicans += u64::from(r.rep_sponsors);
                totals
            })
    }

    /// Timeline bars; bills missing either date are left out.
    pub fn timeline(&self) -> Vec<TimelineRow> {
        self.summary
            .iter()
            .filter_map(|r| {
                Some(TimelineRow {
                    label: r.label(),
                    start_date: r.start_date()?,
                    end_date: r.end_date()?,
                    completion_label: r.completion_label(),
                })
            })
            .collect()
    }
}
