use url::Url;

use super::Query;

/// Query for the `getBill` operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BillQuery {
    pub id: i64,
}

impl BillQuery {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Query for BillQuery {
    fn operation(&self) -> &'static str {
        "getBill"
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("id", &self.id.to_string());
        url
    }
}
