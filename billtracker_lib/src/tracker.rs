//! User actions of an interactive session.
//!
//! Every action validates its input before touching the network, and the
//! session store is only written after a bill has been fully fetched and
//! projected.

use std::collections::HashSet;

use legiscan_api::ALL_YEARS;

use crate::error::BillTrackerError;
use crate::projection::project;
use crate::search::{BillSearcher, DEFAULT_MAX_RESULTS};
use crate::session::SessionStore;
use crate::validation;

/// What `add_bill` appended.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedBill {
    pub bill_id: i64,
    pub state: String,
    pub bill_number: String,
}

/// Owns the session state and runs user actions against the API.
pub struct Tracker {
    searcher: BillSearcher,
    store: SessionStore,
    max_results: usize,
}

impl Tracker {
    pub fn new(searcher: BillSearcher) -> Self {
        Self {
            searcher,
            store: SessionStore::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn searcher(&self) -> &BillSearcher {
        &self.searcher
    }

    /// Looks up a bill by jurisdiction and typed number and starts tracking it.
    ///
    /// `bill_input` may carry the jurisdiction label, e.g. `"Texas (TX) HB7"`.
    pub async fn add_bill(
        &mut self,
        jurisdiction_input: &str,
        bill_input: &str,
        year: Option<i32>,
    ) -> Result<AddedBill, BillTrackerError> {
        if jurisdiction_input.trim().is_empty() || bill_input.trim().is_empty() {
            return Err(BillTrackerError::InvalidInput(
                "please specify both a jurisdiction and a bill number".to_string(),
            ));
        }
        let jurisdiction = validation::validate_jurisdiction(jurisdiction_input)?;
        let bill_text = validation::validate_bill_text(bill_input)?;
        let year = validation::validate_year(year.unwrap_or(ALL_YEARS))?;

        let cleaned = self
            .searcher
            .normalizer()
            .clean_and_normalize(&bill_text, jurisdiction.name);
        if cleaned.is_empty() {
            return Err(BillTrackerError::InvalidInput(format!(
                "'{}' does not contain a bill number",
                bill_text
            )));
        }

        let found = self
            .searcher
            .find_bill_id(jurisdiction.abbreviation, &cleaned, jurisdiction.name, year)
            .await?;
        let Some((bill_id, _candidate)) = found else {
            return Err(BillTrackerError::NotFound(format!(
                "no results found for {} in {}",
                bill_input.trim(),
                jurisdiction.name
            )));
        };

        let detail = self.searcher.fetch_bill(bill_id).await?.ok_or_else(|| {
            BillTrackerError::NotFound(format!("details for bill {} are unavailable", bill_id))
        })?;

        let (flat, summary) = project(&detail);
        let added = AddedBill {
            bill_id,
            state: summary
                .state
                .clone()
                .unwrap_or_else(|| jurisdiction.abbreviation.to_string()),
            bill_number: summary.bill_number.clone().unwrap_or(cleaned),
        };
        self.store.add_record(flat, summary);
        tracing::debug!("Added {} {}", added.state, added.bill_number);
        Ok(added)
    }

    /// Runs a keyword search and replaces the pending results with it.
    ///
    /// Returns the number of results found.
    pub async fn search_keyword(
        &mut self,
        keyword: &str,
        jurisdiction_filter: Option<&str>,
        year: Option<i32>,
    ) -> Result<usize, BillTrackerError> {
        let keyword = validation::validate_keyword(keyword)?;
        let jurisdiction = validation::validate_jurisdiction_filter(jurisdiction_filter)?;
        let year = year.map(validation::validate_year).transpose()?;

        let results = self
            .searcher
            .search_by_keyword(
                &keyword,
                jurisdiction.map(|j| j.abbreviation),
                year,
                self.max_results,
            )
            .await?;
        let count = results.len();
        self.store.replace_search_results(results);
        tracing::debug!("Found {} candidate(s) for {:?}", count, keyword);
        Ok(count)
    }

    /// Adds the selected pending results, then clears the pending list.
    pub async fn add_selected(&mut self, indices: &[usize]) -> Result<usize, BillTrackerError> {
        self.add_selected_with_progress(indices, |_, _| {}).await
    }

    /// Like [`add_selected`](Self::add_selected), calling `on_progress(done, total)`
    /// after each selection.
    ///
    /// Repeated indices count once. Results whose detail cannot be fetched are skipped. A transport failure
    /// stops the loop; bills added before it stay tracked and the pending list
    /// is kept so the selection can be retried.
    pub async fn add_selected_with_progress<F>(
        &mut self,
        indices: &[usize],
        mut on_progress: F,
    ) -> Result<usize, BillTrackerError>
    where
        F: FnMut(usize, usize),
    {
        let pending = self.store.search_results();
        if let Some(bad) = indices.iter().find(|&&i| i >= pending.len()) {
            return Err(BillTrackerError::InvalidInput(format!(
                "selection {} is out of range (0-{})",
                bad,
                pending.len().saturating_sub(1)
            )));
        }
        let mut seen = HashSet::new();
        let bill_ids: Vec<Option<i64>> = indices
            .iter()
            .filter(|&&i| seen.insert(i))
            .map(|&i| pending[i].bill_id)
            .collect();
        let total = bill_ids.len();

        let mut added = 0;
        for (done, bill_id) in bill_ids.into_iter().enumerate() {
            if let Some(bill_id) = bill_id {
                if let Some(detail) = self.searcher.fetch_bill(bill_id).await? {
                    let (flat, summary) = project(&detail);
                    self.store.add_record(flat, summary);
                    added += 1;
                }
            }
            on_progress(done + 1, total);
        }

        self.store.take_search_results();
        tracing::debug!("Added {} bills", added);
        Ok(added)
    }

    pub fn reset(&mut self) {
        self.store.reset_all();
        self.searcher.client().clear_cache();
        tracing::debug!("All data reset for this session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CachedClient;
    use crate::normalize::BillNormalizer;
    use crate::search::KeywordResult;

    // Nothing listens on port 9; any request would surface as a transport error.
    fn offline_tracker() -> Tracker {
        let client = CachedClient::with_base_url("http://127.0.0.1:9/", "test-key").unwrap();
        Tracker::new(BillSearcher::new(client, BillNormalizer::new().unwrap()))
    }

    fn pending(id: Option<i64>) -> KeywordResult {
        KeywordResult {
            bill_id: id,
            state: "TX".to_string(),
            bill_number: Some("HB 7".to_string()),
            title: "Title".to_string(),
            relevance: None,
            last_action_date: None,
        }
    }

    #[tokio::test]
    async fn test_add_bill_requires_both_inputs() {
        let mut tracker = offline_tracker();
        let err = tracker.add_bill("", "HB7", None).await.unwrap_err();
        assert!(matches!(err, BillTrackerError::InvalidInput(_)));
        let err = tracker.add_bill("Texas", "   ", None).await.unwrap_err();
        assert!(matches!(err, BillTrackerError::InvalidInput(_)));
        assert!(tracker.store().is_empty());
    }

    #[tokio::test]
    async fn test_add_bill_rejects_unknown_jurisdiction() {
        let mut tracker = offline_tracker();
        let err = tracker.add_bill("Atlantis", "HB7", None).await.unwrap_err();
        assert!(matches!(err, BillTrackerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_add_bill_label_only_input() {
        let mut tracker = offline_tracker();
        let err = tracker.add_bill("Texas", "Texas (TX)", None).await.unwrap_err();
        assert!(matches!(err, BillTrackerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_add_bill_transport_error_propagates() {
        let mut tracker = offline_tracker();
        let err = tracker.add_bill("Texas", "HB7", None).await.unwrap_err();
        assert!(err.is_transport());
        assert!(tracker.store().is_empty());
    }

    #[tokio::test]
    async fn test_search_keyword_rejects_empty() {
        let mut tracker = offline_tracker();
        let err = tracker.search_keyword("  ", None, None).await.unwrap_err();
        assert!(matches!(err, BillTrackerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_search_keyword_rejects_bad_filter() {
        let mut tracker = offline_tracker();
        let err = tracker
            .search_keyword("water", Some("Narnia"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, BillTrackerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_add_selected_out_of_range() {
        let mut tracker = offline_tracker();
        tracker.store.replace_search_results(vec![pending(Some(1))]);
        let err = tracker.add_selected(&[0, 3]).await.unwrap_err();
        assert!(matches!(err, BillTrackerError::InvalidInput(_)));
        assert_eq!(tracker.store().search_results().len(), 1);
    }

    #[tokio::test]
    async fn test_add_selected_skips_missing_ids() {
        let mut tracker = offline_tracker();
        tracker.store.replace_search_results(vec![pending(None), pending(None)]);
        let mut ticks = Vec::new();
        let added = tracker
            .add_selected_with_progress(&[0, 1, 1, 0], |done, total| ticks.push((done, total)))
            .await
            .unwrap();
        assert_eq!(added, 0);
        assert_eq!(ticks, vec![(1, 2), (2, 2)]);
        assert!(tracker.store().search_results().is_empty());
    }

    #[tokio::test]
    async fn test_add_selected_transport_error_keeps_pending() {
        let mut tracker = offline_tracker();
        tracker.store.replace_search_results(vec![pending(Some(5))]);
        let err = tracker.add_selected(&[0]).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(tracker.store().search_results().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = offline_tracker();
        tracker.store.replace_search_results(vec![pending(Some(1))]);
        tracker.reset();
        assert!(tracker.store().is_empty());
        assert!(tracker.store().search_results().is_empty());
    }
}
