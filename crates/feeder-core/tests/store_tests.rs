use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use feeder_core::session::{MemoryStore, Session};
use feeder_core::{ApiGateway, AppConfig, ArticleList, CurrentArticle, Error, FeedList};

fn gateway(uri: &str) -> ApiGateway {
    let mut config = AppConfig::default();
    config.server.base_url = format!("{}/api", uri);
    let session = Session::load(Box::new(MemoryStore::new()));
    ApiGateway::new(&config, session.token()).unwrap()
}

#[tokio::test]
async fn feed_list_update_recomputes_total_unreads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/feeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feeds": [
                {"id": 1, "name": "a", "url": "http://a", "unreads": 3},
                {"id": 2, "name": "b", "url": "http://b", "unreads": 0},
                {"id": 3, "name": "c", "url": "http://c", "unreads": 4}
            ]
        })))
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut feeds = FeedList::new();
    feeds.update(&gateway).await.unwrap();

    assert_eq!(feeds.feeds().len(), 3);
    assert_eq!(feeds.unreads(), 7);
    assert_eq!(
        feeds.unreads(),
        feeds.feeds().iter().map(|f| f.unreads).sum::<u32>()
    );
}

#[tokio::test]
async fn add_subscribes_then_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/feeds"))
        .and(body_json(json!({"url": "https://example.com/feed.xml"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feeds": [
                {"id": 5, "name": "example", "url": "https://example.com", "unreads": 12}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut feeds = FeedList::new();
    feeds.add(&gateway, "https://example.com/feed.xml").await.unwrap();

    assert_eq!(feeds.feeds().len(), 1);
    assert_eq!(feeds.unreads(), 12);
}

#[tokio::test]
async fn add_rejects_malformed_url_before_any_request() {
    let server = MockServer::start().await;
    let gateway = gateway(&server.uri());
    let mut feeds = FeedList::new();

    let err = feeds.add(&gateway, "not a feed url").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(feeds.is_empty());
}

#[tokio::test]
async fn batch_add_drops_failures_and_refetches_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/feeds"))
        .and(body_json(json!({"url": "https://good.example/rss"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/feeds"))
        .and(body_json(json!({"url": "https://bad.example/rss"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "Error fetching feed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feeds": [
                {"id": 1, "name": "good", "url": "https://good.example", "unreads": 0}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut feeds = FeedList::new();

    let added = feeds
        .add_many(
            &gateway,
            &[
                "https://good.example/rss".to_string(),
                "https://bad.example/rss".to_string(),
            ],
        )
        .await
        .unwrap();

    assert_eq!(added, 1);
    assert_eq!(feeds.feeds().len(), 1);
}

#[tokio::test]
async fn remove_unsubscribes_then_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/feeds/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"feeds": []})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut feeds = FeedList::new();
    feeds.remove(&gateway, 3).await.unwrap();

    assert!(feeds.is_empty());
}

#[tokio::test]
async fn empty_feed_yields_empty_list_tagged_with_feed_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/feeds/7/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": []})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut list = ArticleList::new(300);
    list.update(&gateway, 7).await.unwrap();

    assert_eq!(list.feed_id(), Some(7));
    assert!(list.entries().is_empty());
}

#[tokio::test]
async fn list_fetch_resolves_ids_then_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/feeds/1/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": [41, 42]})))
        // One for the initial navigation, one for the forced refresh
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/entries/41,42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {"id": 41, "feed_id": 1, "title": "first", "content": "x", "read": false},
                {"id": 42, "feed_id": 1, "title": "second", "content": "y", "read": false}
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut list = ArticleList::new(300);

    list.update(&gateway, 1).await.unwrap();
    assert_eq!(list.entries().len(), 2);

    // Re-entering the same feed does not refetch
    list.update(&gateway, 1).await.unwrap();

    // An explicit refresh does
    list.refresh(&gateway).await.unwrap();
}

#[tokio::test]
async fn marking_read_flows_back_into_the_summary_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/feeds/1/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": [41, 42]})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/entries/41,42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {"id": 41, "feed_id": 1, "title": "first", "content": "x", "read": false},
                {"id": 42, "feed_id": 1, "title": "second", "content": "y", "read": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/entries/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {"id": 42, "feed_id": 1, "title": "second", "content": "<p>full body</p>", "read": false}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/entries/42"))
        .and(body_json(json!({"read": true})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut list = ArticleList::new(300);
    let mut current = CurrentArticle::new();

    list.update(&gateway, 1).await.unwrap();
    current.update(&gateway, 42).await.unwrap();
    current.mark_read(&gateway).await.unwrap();
    list.push(current.article());

    let by_id = |id: i64| list.entries().iter().find(|e| e.id == id).unwrap().clone();
    assert!(by_id(42).read);
    assert!(!by_id(41).read);

    // Unread counts taken off the reconciled cache, no second list fetch
    let unread = list.entries().iter().filter(|e| !e.read).count();
    assert_eq!(unread, 1);
}

#[tokio::test]
async fn failed_status_call_leaves_local_flag_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/entries/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {"id": 42, "feed_id": 1, "title": "second", "content": "z", "read": false}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/entries/42"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": 500, "message": "Internal Server Error"}
        })))
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let mut current = CurrentArticle::new();
    current.update(&gateway, 42).await.unwrap();

    let err = current.mark_read(&gateway).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, .. }));

    // Still consistent with the last known server state
    assert!(!current.article().unwrap().read);
}

#[tokio::test]
async fn invalid_status_keyword_rejects_before_any_request() {
    let server = MockServer::start().await;
    let gateway = gateway(&server.uri());
    let mut current = CurrentArticle::new();

    // No mocks mounted: had a request gone out, the error would be NotFound
    let err = current.set_status(&gateway, "archived").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn status_change_with_no_open_article_is_a_validation_error() {
    let server = MockServer::start().await;
    let gateway = gateway(&server.uri());
    let mut current = CurrentArticle::new();

    let err = current.set_status(&gateway, "read").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
