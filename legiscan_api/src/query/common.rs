//! Shared query infrastructure: the [`Query`] trait and the year sentinel.

use url::Url;

/// Year filter the search endpoint treats as "all years".
///
/// Passed through unchanged; the API also understands `2` (current),
/// `3` (recent), `4` (prior) and exact years.
pub const ALL_YEARS: i32 = 1;

/// Trait implemented by all query builders.
///
/// Every LegiScan call goes to the same endpoint and is dispatched on the
/// `op` parameter; the client adds `key` and `op`, the query adds the rest.
pub trait Query {
    /// The value of the `op` parameter for this query.
    fn operation(&self) -> &'static str;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}
