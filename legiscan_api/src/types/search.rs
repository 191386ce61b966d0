//! Search result types and the container-shape normalisation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record returned by `getSearch`.
///
/// Every field is optional: the search endpoint is loose about what it
/// includes, and older responses use `number`/`short_title` instead of
/// `bill_number`/`title`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchCandidate {
    pub bill_id: Option<i64>,
    pub state: Option<String>,
    pub bill_number: Option<String>,
    pub number: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,
    /// Textual match quality, higher is better.
    pub relevance: Option<f64>,
    /// ISO `YYYY-MM-DD`.
    pub last_action_date: Option<String>,
    pub last_action: Option<String>,
    pub url: Option<String>,
}

impl SearchCandidate {
    /// `bill_number`, falling back to `number`.
    pub fn display_number(&self) -> Option<&str> {
        non_empty(self.bill_number.as_deref()).or(non_empty(self.number.as_deref()))
    }

    /// `title`, falling back to `short_title`.
    pub fn display_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref()).or(non_empty(self.short_title.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The `summary` block of a search response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResultSummary {
    pub page: Option<String>,
    pub range: Option<String>,
    pub relevancy: Option<String>,
    pub count: Option<i64>,
    pub page_current: Option<i64>,
    pub page_total: Option<i64>,
    pub query: Option<String>,
}

/// The shapes `searchresult` comes in.
#[derive(Debug, Clone, Copy)]
pub enum SearchResultShape<'a> {
    /// A JSON array of records, either bare or under a `results` key.
    List(&'a [Value]),
    /// An object of records under a `results` key.
    Map(&'a Map<String, Value>),
    /// An object mixing a `summary` block with records under `"0"`, `"1"`, ...
    Mixed(&'a Map<String, Value>),
    /// Anything else (null, scalar).
    Empty,
}

impl<'a> SearchResultShape<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(obj) => match obj.get("results") {
                Some(Value::Array(items)) => Self::List(items),
                Some(Value::Object(map)) => Self::Map(map),
                _ => Self::Mixed(obj),
            },
            _ => Self::Empty,
        }
    }

    /// Raw record objects in API order.
    ///
    /// Map and mixed containers are ordered by numeric key, with any
    /// non-numeric keys of a map after them.
    pub fn records(&self) -> Vec<&'a Value> {
        match *self {
            Self::List(items) => items.iter().filter(|v| v.is_object()).collect(),
            Self::Map(map) => ordered_records(map, false),
            Self::Mixed(map) => ordered_records(map, true),
            Self::Empty => Vec::new(),
        }
    }

    pub fn candidates(&self) -> Vec<SearchCandidate> {
        self.records()
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<SearchCandidate>(v.clone()) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::debug!("Skipping unreadable search record: {}", e);
                    None
                }
            })
            .collect()
    }
}

fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn ordered_records(map: &Map<String, Value>, numeric_only: bool) -> Vec<&Value> {
    let mut keyed: Vec<(Option<u64>, &String, &Value)> = map
        .iter()
        .filter(|(k, v)| v.is_object() && (!numeric_only || is_numeric_key(k)))
        .map(|(k, v)| (k.parse::<u64>().ok(), k, v))
        .collect();
    keyed.sort_by(|a, b| match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.1.cmp(b.1),
    });
    keyed.into_iter().map(|(_, _, v)| v).collect()
}
