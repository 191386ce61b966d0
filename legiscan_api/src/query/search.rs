use url::Url;

use super::{common::ALL_YEARS, Query};

/// Query for the `getSearch` operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub state: Option<String>,
    pub year: i32,
}

impl Query for SearchQuery {
    fn operation(&self) -> &'static str {
        "getSearch"
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(state) = &self.state {
            url.query_pairs_mut().append_pair("state", state.as_str());
        }
        url.query_pairs_mut()
            .append_pair("query", self.query.as_str())
            .append_pair("year", &self.year.to_string());
        url
    }
}

impl SearchQuery {
    /// A search across all jurisdictions and all years.
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            state: None,
            year: ALL_YEARS,
        }
    }

    /// Restricts the search to one jurisdiction (two-letter abbreviation).
    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }
}
