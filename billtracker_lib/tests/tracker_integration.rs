use billtracker_lib::cache::MemoryCache;
use billtracker_lib::legiscan_api::Client;
use billtracker_lib::{
    BillNormalizer, BillSearcher, BillTrackerError, CachedClient, Tracker,
};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn tracker_for(server: &MockServer) -> Tracker {
    let client = CachedClient::with_base_url(&server.uri(), "test-key").unwrap();
    Tracker::new(BillSearcher::new(client, BillNormalizer::new().unwrap()))
}

fn cached_tracker_for(server: &MockServer) -> Tracker {
    let inner = Client::with_base_url(&server.uri(), "test-key").unwrap();
    let client = CachedClient::new(inner, MemoryCache::new(Duration::from_secs(60)));
    Tracker::new(BillSearcher::new(client, BillNormalizer::new().unwrap()))
}

async fn mount_search(server: &MockServer, query: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("op", "getSearch"))
        .and(query_param("query", query))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(server)
        .await;
}

async fn mount_bill(server: &MockServer, id: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("op", "getBill"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(server)
        .await;
}

// ============================================================================
// Bill lookup
// ============================================================================

#[tokio::test]
async fn find_bill_id_prefers_exact_match() {
    let server = MockServer::start().await;
    mount_search(&server, "HB 7", "search_mixed.json").await;

    let tracker = tracker_for(&server);
    let (id, candidate) = tracker
        .searcher()
        .find_bill_id("TX", "HB7", "Texas", 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(id, 1712345);
    assert_eq!(candidate.bill_number.as_deref(), Some("HB7"));
}

#[tokio::test]
async fn find_bill_id_falls_through_variants() {
    let server = MockServer::start().await;
    mount_search(&server, "HB 7", "search_empty.json").await;
    mount_search(&server, "HB7", "search_error.json").await;
    mount_search(&server, "7", "search_mixed.json").await;

    let tracker = tracker_for(&server);
    let found = tracker
        .searcher()
        .find_bill_id("TX", "HB 7", "Texas", 1)
        .await
        .unwrap();
    // "7" matches nothing exactly, so the most relevant candidate wins.
    assert_eq!(found.map(|(id, _)| id), Some(1712345));
}

#[tokio::test]
async fn find_bill_id_all_variants_miss() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_empty.json")))
        .expect(3)
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let found = tracker
        .searcher()
        .find_bill_id("TX", "HB 7", "Texas", 1)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn find_bill_id_ties_break_on_latest_action() {
    let server = MockServer::start().await;
    mount_search(&server, "HF 12", "search_iowa.json").await;

    let tracker = tracker_for(&server);
    let found = tracker
        .searcher()
        .find_bill_id("IA", "HB12", "Iowa", 1)
        .await
        .unwrap();
    assert_eq!(found.map(|(id, _)| id), Some(901));
}

#[tokio::test]
async fn find_bill_id_http_error_is_a_miss() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let found = tracker
        .searcher()
        .find_bill_id("TX", "HB7", "Texas", 1)
        .await
        .unwrap();
    assert!(found.is_none());
}

// ============================================================================
// Keyword search
// ============================================================================

#[tokio::test]
async fn keyword_search_maps_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("op", "getSearch"))
        .and(query_param("query", "border"))
        .and(query_param("state", "TX"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_mixed.json")))
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let results = tracker
        .searcher()
        .search_by_keyword("border", Some("TX"), None, 2)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].bill_id, Some(1712345));
    assert_eq!(results[0].state, "TX");
    assert_eq!(results[1].bill_number.as_deref(), Some("HB70"));
}

#[tokio::test]
async fn keyword_search_malformed_body_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut tracker = tracker_for(&server);
    let count = tracker.search_keyword("water", None, None).await.unwrap();
    assert_eq!(count, 0);
    assert!(tracker.store().search_results().is_empty());
}

// ============================================================================
// Tracker actions
// ============================================================================

#[tokio::test]
async fn add_bill_appends_projected_rows() {
    let server = MockServer::start().await;
    mount_search(&server, "HB 7", "search_mixed.json").await;
    mount_bill(&server, "1712345", "bill.json").await;

    let mut tracker = tracker_for(&server);
    let added = tracker.add_bill("Texas", "Texas (TX) HB7", None).await.unwrap();
    assert_eq!(added.bill_id, 1712345);
    assert_eq!(added.bill_number, "HB7");

    let store = tracker.store();
    assert_eq!(store.len(), 1);
    assert_eq!(store.flat_records()[0].session_start, Some(2023));
    let summary = &store.summary_records()[0];
    assert_eq!(summary.dem_sponsors, 2);
    assert_eq!(summary.rep_sponsors, 1);
    assert!(summary.is_completed());
}

#[tokio::test]
async fn add_bill_applies_jurisdiction_prefixes() {
    let server = MockServer::start().await;
    mount_search(&server, "HF 12", "search_iowa.json").await;
    mount_bill(&server, "901", "bill_iowa.json").await;

    let mut tracker = tracker_for(&server);
    let added = tracker.add_bill("iowa", "hb 012", Some(2024)).await.unwrap();
    assert_eq!(added.state, "IA");
    assert_eq!(tracker.store().party_totals().republicans, 1);
}

#[tokio::test]
async fn add_bill_not_found_leaves_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_empty.json")))
        .mount(&server)
        .await;

    let mut tracker = tracker_for(&server);
    let err = tracker.add_bill("Texas", "HB7", None).await.unwrap_err();
    assert!(matches!(err, BillTrackerError::NotFound(_)));
    assert!(tracker.store().is_empty());
}

#[tokio::test]
async fn add_bill_missing_detail_is_not_found() {
    let server = MockServer::start().await;
    mount_search(&server, "HB 7", "search_mixed.json").await;
    Mock::given(method("GET"))
        .and(query_param("op", "getBill"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_error.json")))
        .mount(&server)
        .await;

    let mut tracker = tracker_for(&server);
    let err = tracker.add_bill("Texas", "HB7", None).await.unwrap_err();
    assert!(matches!(err, BillTrackerError::NotFound(_)));
    assert!(tracker.store().is_empty());
}

#[tokio::test]
async fn add_selected_adds_and_clears_pending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("op", "getSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_mixed.json")))
        .mount(&server)
        .await;
    mount_bill(&server, "1712345", "bill.json").await;
    Mock::given(method("GET"))
        .and(query_param("op", "getBill"))
        .and(query_param("id", "1711001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"OK","bill":null}"#))
        .mount(&server)
        .await;

    let mut tracker = tracker_for(&server);
    assert_eq!(tracker.search_keyword("border", Some("Texas"), None).await.unwrap(), 3);

    let added = tracker.add_selected(&[0, 2]).await.unwrap();
    assert_eq!(added, 1);
    assert_eq!(tracker.store().len(), 1);
    assert!(tracker.store().search_results().is_empty());
}

#[tokio::test]
async fn cached_lookup_hits_api_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("op", "getSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_mixed.json")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("op", "getBill"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("bill.json")))
        .expect(1)
        .mount(&server)
        .await;

    let mut tracker = cached_tracker_for(&server);
    tracker.add_bill("Texas", "HB7", None).await.unwrap();
    tracker.add_bill("Texas", "HB 7", None).await.unwrap();
    assert_eq!(tracker.store().len(), 2);
}

#[tokio::test]
async fn reset_after_adds() {
    let server = MockServer::start().await;
    mount_search(&server, "HB 7", "search_mixed.json").await;
    mount_bill(&server, "1712345", "bill.json").await;

    let mut tracker = tracker_for(&server);
    tracker.add_bill("Texas", "HB7", None).await.unwrap();
    tracker.reset();
    assert!(tracker.store().is_empty());
    assert_eq!(tracker.store().kpis().total, 0);
}

#[tokio::test]
async fn add_selected_counts_repeated_indices_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("op", "getSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_mixed.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("op", "getBill"))
        .and(query_param("id", "1712345"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("bill.json")))
        .expect(1)
        .mount(&server)
        .await;

    let mut tracker = tracker_for(&server);
    tracker.search_keyword("border", Some("TX"), None).await.unwrap();

    let added = tracker.add_selected(&[0, 0, 0]).await.unwrap();
    assert_eq!(added, 1);
    assert_eq!(tracker.store().len(), 1);
    assert_eq!(tracker.store().party_totals().democrats, 2);
}

#[tokio::test]
async fn keyword_search_with_no_matches_is_empty() {
    let server = MockServer::start().await;
    mount_search(&server, "zoning", "search_empty.json").await;

    let tracker = tracker_for(&server);
    let results = tracker
        .searcher()
        .search_by_keyword("zoning", None, None, 200)
        .await
        .unwrap();
    assert_eq!(results, vec![]);

    let mut tracker = tracker;
    assert_eq!(tracker.search_keyword("zoning", Some("All"), None).await.unwrap(), 0);
    assert!(tracker.store().search_results().is_empty());
}

#[tokio::test]
async fn reset_drops_cached_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("op", "getSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_mixed.json")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("op", "getBill"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("bill.json")))
        .expect(2)
        .mount(&server)
        .await;

    let mut tracker = cached_tracker_for(&server);
    tracker.add_bill("Texas", "HB7", None).await.unwrap();
    tracker.reset();
    tracker.add_bill("Texas", "HB7", None).await.unwrap();
    assert_eq!(tracker.store().len(), 1);
}
