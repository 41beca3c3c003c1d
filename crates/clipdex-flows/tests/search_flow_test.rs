//! End-to-end tests for the search workflow against the mock backend.

use std::sync::Arc;
use std::time::Duration;

use clipdex_client::MockCatalogBackend;
use clipdex_core::{Error, SearchHit};
use clipdex_flows::SearchFlow;
use clipdex_tasks::StatusNotifier;

fn hit(id: &str, title: &str) -> SearchHit {
    SearchHit {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("description of {title}")),
        summary: None,
        source_url: format!("http://example.com/v/{id}"),
        similarity: 0.8,
    }
}

fn flow_with(mock: &MockCatalogBackend) -> (SearchFlow, StatusNotifier) {
    let status = StatusNotifier::new();
    (
        SearchFlow::new(Arc::new(mock.clone()), status.clone()),
        status,
    )
}

#[tokio::test(start_paused = true)]
async fn test_search_stores_results() {
    let mock =
        MockCatalogBackend::new().with_search_results(vec![hit("1", "Harbor"), hit("2", "Market")]);
    let (flow, status) = flow_with(&mock);

    assert!(!flow.has_searched());
    flow.search("boats").await;

    assert!(flow.has_searched());
    assert!(!flow.is_searching());
    assert!(flow.error().is_none());
    let results = flow.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Harbor");
    assert_eq!(status.current(), "2 objects found.");
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_is_noop() {
    let mock = MockCatalogBackend::new();
    let (flow, _status) = flow_with(&mock);

    flow.search("   ").await;

    assert!(!flow.has_searched());
    assert_eq!(mock.call_count("search"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failure_sets_error_and_keeps_prior_results() {
    let mock = MockCatalogBackend::new()
        .with_search_results(vec![hit("1", "Harbor")])
        .with_search_failure(Error::Timeout);
    let (flow, status) = flow_with(&mock);

    flow.search("boats").await;
    assert_eq!(flow.results().len(), 1);

    flow.search("ships").await;
    assert_eq!(flow.error().as_deref(), Some("Search timed out."));
    assert_eq!(status.current(), "Search timed out.");
    // The failed query does not disturb the previous result set.
    assert_eq!(flow.results().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_keeps_prior_results_and_discards_late_hits() {
    let mock = MockCatalogBackend::new()
        .with_search_results(vec![hit("1", "Harbor")])
        .with_search_results(vec![hit("2", "Market"), hit("3", "Bridge")])
        .with_latency(Duration::from_secs(30));
    let (flow, status) = flow_with(&mock);

    flow.search("boats").await;
    assert_eq!(flow.results().len(), 1);

    let running = flow.clone();
    let handle = tokio::spawn(async move { running.search("market").await });
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert!(flow.is_searching());

    flow.cancel();
    assert!(!flow.is_searching());
    assert_eq!(status.current(), "Search cancelled.");
    assert_eq!(flow.results().len(), 1);

    // The late-arriving hits for the cancelled query are discarded.
    handle.await.unwrap();
    assert_eq!(flow.results().len(), 1);
    assert_eq!(flow.results()[0].title, "Harbor");
    assert!(flow.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_second_search_while_running_is_rejected() {
    let mock = MockCatalogBackend::new().with_latency(Duration::from_secs(30));
    let (flow, _status) = flow_with(&mock);

    let running = flow.clone();
    let handle = tokio::spawn(async move { running.search("first").await });
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }

    flow.search("second").await;
    assert_eq!(mock.call_count("search"), 1);

    handle.await.unwrap();
    // Only the first query's (empty default) results landed.
    assert!(flow.results().is_empty());
    assert!(flow.has_searched());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_without_search_is_noop() {
    let mock = MockCatalogBackend::new();
    let (flow, status) = flow_with(&mock);

    flow.cancel();
    assert_eq!(status.current(), "Ready");
    assert!(!flow.has_searched());
}
