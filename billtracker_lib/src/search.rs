//! Bill lookup against the search endpoint.
//!
//! A typed bill number is tried in several spellings ("variants") until one
//! of them produces a usable match. Upstream failures count as a miss for
//! that variant; only transport failures abort the lookup.

use std::cmp::Ordering;

use legiscan_api::types::{BillDetail, SearchCandidate};
use legiscan_api::SearchQuery;
use serde::{Deserialize, Serialize};

use crate::client::CachedClient;
use crate::error::BillTrackerError;
use crate::normalize::BillNormalizer;

/// Default cap on keyword search results.
pub const DEFAULT_MAX_RESULTS: usize = 200;

/// One row of a keyword search, ready to display or select.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KeywordResult {
    pub bill_id: Option<i64>,
    pub state: String,
    pub bill_number: Option<String>,
    pub title: String,
    pub relevance: Option<f64>,
    pub last_action_date: Option<String>,
}

impl KeywordResult {
    fn from_candidate(candidate: &SearchCandidate, state_filter: Option<&str>) -> Self {
        Self {
            bill_id: candidate.bill_id,
            state: candidate
                .state
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .or(state_filter)
                .unwrap_or_default()
                .to_uppercase(),
            bill_number: candidate.display_number().map(str::to_string),
            title: candidate.display_title().unwrap_or_default().to_string(),
            relevance: candidate.relevance,
            last_action_date: candidate.last_action_date.clone(),
        }
    }
}

/// Upper-case and drop everything except ASCII letters and digits.
pub fn compact_bill_number(value: &str) -> String {
    value
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// Spellings to try, in order: canonical, as typed, without spaces, digits only.
///
/// Duplicates and empty spellings are dropped.
pub fn query_variants(raw: &str, canonical: &str) -> Vec<String> {
    let candidates = [
        canonical.to_string(),
        raw.to_string(),
        raw.replace(' ', ""),
        raw.chars().filter(|c| c.is_ascii_digit()).collect(),
    ];
    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for variant in candidates {
        if !variant.trim().is_empty() && !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

/// Best candidate for `variant`: exact bill-number matches if there are
/// any, otherwise everything; then highest relevance, then latest action.
///
/// Ties keep API order.
pub fn pick_best_candidate<'a>(
    candidates: &'a [SearchCandidate],
    variant: &str,
) -> Option<&'a SearchCandidate> {
    let target = compact_bill_number(variant);
    let exact: Vec<&SearchCandidate> = candidates
        .iter()
        .filter(|c| compact_bill_number(c.bill_number.as_deref().unwrap_or_default()) == target)
        .collect();
    let pool: Vec<&SearchCandidate> = if exact.is_empty() {
        candidates.iter().collect()
    } else {
        exact
    };

    pool.into_iter().fold(None, |best, candidate| match best {
        Some(current) if rank(candidate, current) != Ordering::Greater => Some(current),
        _ => Some(candidate),
    })
}

fn rank(a: &SearchCandidate, b: &SearchCandidate) -> Ordering {
    let relevance = a
        .relevance
        .unwrap_or(0.0)
        .partial_cmp(&b.relevance.unwrap_or(0.0))
        .unwrap_or(Ordering::Equal);
    relevance.then_with(|| {
        a.last_action_date
            .as_deref()
            .unwrap_or_default()
            .cmp(b.last_action_date.as_deref().unwrap_or_default())
    })
}

/// Searches for bills through a [`CachedClient`].
pub struct BillSearcher {
    client: CachedClient,
    normalizer: BillNormalizer,
}

impl BillSearcher {
    pub fn new(client: CachedClient, normalizer: BillNormalizer) -> Self {
        Self { client, normalizer }
    }

    pub fn normalizer(&self) -> &BillNormalizer {
        &self.normalizer
    }

    pub fn client(&self) -> &CachedClient {
        &self.client
    }

    /// Resolves a typed bill number to the API's bill id.
    ///
    /// Returns `Ok(None)` when no variant produced a match.
    pub async fn find_bill_id(
        &self,
        state: &str,
        bill_raw: &str,
        jurisdiction: &str,
        year: i32,
    ) -> Result<Option<(i64, SearchCandidate)>, BillTrackerError> {
        let canonical = self.normalizer.normalize(bill_raw, jurisdiction);
        for variant in query_variants(bill_raw, &canonical) {
            let query = SearchQuery::new(&variant).with_state(state).with_year(year);
            let resp = match self.client.search(&query).await {
                Ok(resp) => resp,
                Err(e) if !e.is_transport() => {
                    tracing::debug!("variant {:?} missed: {}", variant, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let candidates = resp.candidates();
            if candidates.is_empty() {
                tracing::debug!("variant {:?} returned no results", variant);
                continue;
            }

            match pick_best_candidate(&candidates, &variant) {
                Some(picked) => match picked.bill_id {
                    Some(bill_id) => {
                        tracing::info!(
                            "{} {:?} resolved to bill {} via {:?}",
                            state,
                            bill_raw,
                            bill_id,
                            variant
                        );
                        return Ok(Some((bill_id, picked.clone())));
                    }
                    None => tracing::debug!("variant {:?} best match has no bill id", variant),
                },
                None => tracing::debug!("variant {:?} produced no pick", variant),
            }
        }
        Ok(None)
    }

    /// Free-text search. Upstream failures yield an empty list.
    pub async fn search_by_keyword(
        &self,
        keyword: &str,
        state: Option<&str>,
        year: Option<i32>,
        max_results: usize,
    ) -> Result<Vec<KeywordResult>, BillTrackerError> {
        let mut query = SearchQuery::new(keyword);
        if let Some(state) = state {
            query = query.with_state(state);
        }
        if let Some(year) = year {
            query = query.with_year(year);
        }

        let resp = match self.client.search(&query).await {
            Ok(resp) => resp,
            Err(e) if !e.is_transport() => {
                tracing::warn!("keyword search for {:?} failed: {}", keyword, e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        Ok(resp
            .candidates()
            .iter()
            .take(max_results)
            .map(|c| KeywordResult::from_candidate(c, state))
            .collect())
    }

    /// Fetches full bill detail. Upstream failures yield `None`.
    pub async fn fetch_bill(&self, bill_id: i64) -> Result<Option<BillDetail>, BillTrackerError> {
        match self.client.get_bill(bill_id).await {
            Ok(resp) => Ok(resp.bill),
            Err(e) if !e.is_transport() => {
                tracing::warn!("bill {} unavailable: {}", bill_id, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
