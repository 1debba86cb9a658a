//! Suggestion Endpoint Contract Tests
//!
//! These tests verify exact HTTP format compliance for every suggestion
//! engine. Focus: request paths and query parameters, response-shape
//! parsing, throttling, and proxy rewriting.
//!
//! Every test points the client at a wiremock server via the config's
//! base-url override; no real endpoint is contacted.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wisp_suggest::{SearchEngine, SuggestClient, SuggestConfig, SuggestError};

fn client_for(mock_server: &MockServer) -> SuggestClient {
    let config = SuggestConfig::default().with_base_url(mock_server.uri());
    SuggestClient::new(config).expect("client should build")
}

// ────────────────────────────────────────────────────────────────────────────
// Request Format Tests
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn duckduckgo_request_asks_for_list_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ac/"))
        .and(query_param("q", "rust"))
        .and(query_param("type", "list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"["rust", ["rust book", "rustup"]]"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::DuckDuckGo, "rust")
        .await
        .expect("fetch should succeed");

    assert_eq!(suggestions, vec!["rust book", "rustup"]);
}

#[tokio::test]
async fn google_request_carries_client_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/complete/search"))
        .and(query_param("client", "firefox"))
        .and(query_param("q", "cat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"["cat", ["cats", "category"]]"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::Google, "cat")
        .await
        .expect("fetch should succeed");

    assert_eq!(suggestions, vec!["cats", "category"]);
}

#[tokio::test]
async fn youtube_request_scopes_to_video_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/complete/search"))
        .and(query_param("ds", "yt"))
        .and(query_param("q", "ferris"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["ferris", ["ferris crab"]]"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::YouTube, "ferris")
        .await
        .expect("fetch should succeed");

    assert_eq!(suggestions, vec!["ferris crab"]);
}

#[tokio::test]
async fn engines_without_own_endpoint_borrow_googles() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/complete/search"))
        .and(query_param("client", "firefox"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["q", ["shared"]]"#))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    for engine in [
        SearchEngine::Bing,
        SearchEngine::GoogleImages,
        SearchEngine::Quora,
    ] {
        let suggestions = client.fetch(engine, "q").await.expect("fetch should succeed");
        assert_eq!(suggestions, vec!["shared"]);
    }
}

#[tokio::test]
async fn wikipedia_request_uses_opensearch_action() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "opensearch"))
        .and(query_param("search", "russell"))
        .and(query_param("format", "json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"["russell", ["Bertrand Russell"], [""], ["https://x"]]"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::Wikipedia, "russell")
        .await
        .expect("fetch should succeed");

    assert_eq!(suggestions, vec!["Bertrand Russell"]);
}

#[tokio::test]
async fn query_text_is_percent_encoded_on_the_wire() {
    let mock_server = MockServer::start().await;

    // wiremock matches against the decoded value, so a match here means
    // the raw URL carried a properly encoded query.
    Mock::given(method("GET"))
        .and(path("/ac/"))
        .and(query_param("q", "fish & chips"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["fish & chips", []]"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::DuckDuckGo, "fish & chips")
        .await
        .expect("fetch should succeed");

    assert!(suggestions.is_empty());
}

// ────────────────────────────────────────────────────────────────────────────
// Response Parsing Tests
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn brave_rich_entities_are_formatted() {
    let mock_server = MockServer::start().await;

    let body = r#"[
        "par",
        [
            {"q": "paris", "is_entity": true, "name": "Paris", "category": "City"},
            {"q": "paris weather", "is_entity": false}
        ]
    ]"#;

    Mock::given(method("GET"))
        .and(path("/api/suggest"))
        .and(query_param("rich", "true"))
        .and(query_param("source", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::Brave, "par")
        .await
        .expect("fetch should succeed");

    assert_eq!(suggestions, vec!["paris - Paris (City)", "paris weather"]);
}

#[tokio::test]
async fn reddit_listing_names_the_community() {
    let mock_server = MockServer::start().await;

    let body = r#"{
        "data": {
            "children": [
                {"data": {"title": "Announcing Rust 1.80", "subreddit_name_prefixed": "r/rust"}},
                {"data": {"subreddit_name_prefixed": "r/untitled"}}
            ]
        }
    }"#;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "rust"))
        .and(query_param("sort", "relevance"))
        .and(query_param("limit", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::Reddit, "rust")
        .await
        .expect("fetch should succeed");

    assert_eq!(suggestions, vec!["Announcing Rust 1.80 (r/rust)"]);
}

#[tokio::test]
async fn empty_completion_list_is_ok_and_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ac/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["zxqj", []]"#))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let suggestions = client
        .fetch(SearchEngine::DuckDuckGo, "zxqj")
        .await
        .expect("fetch should succeed");

    assert!(suggestions.is_empty());
}

// ────────────────────────────────────────────────────────────────────────────
// Error Mapping Tests
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn http_500_maps_to_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ac/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let err = client
        .fetch(SearchEngine::DuckDuckGo, "rust")
        .await
        .unwrap_err();

    assert!(matches!(err, SuggestError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn wrong_shape_maps_to_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ac/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"unexpected": true}"#))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let err = client
        .fetch(SearchEngine::DuckDuckGo, "rust")
        .await
        .unwrap_err();

    assert!(matches!(err, SuggestError::Parse(_)), "got {err:?}");
}

// ────────────────────────────────────────────────────────────────────────────
// Throttle Tests
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reddit_second_fetch_inside_interval_is_skipped() {
    let mock_server = MockServer::start().await;

    let body = r#"{"data": {"children": [{"data": {"title": "One", "subreddit_name_prefixed": "r/one"}}]}}"#;

    // expect(1): the skipped second fetch must never reach the wire.
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);

    let first = client
        .fetch(SearchEngine::Reddit, "one")
        .await
        .expect("first fetch should succeed");
    assert_eq!(first, vec!["One (r/one)"]);

    let second = client.fetch(SearchEngine::Reddit, "one more").await;
    assert!(
        matches!(second, Err(SuggestError::Throttled(_))),
        "got {second:?}"
    );
}

#[tokio::test]
async fn reddit_fetch_after_interval_goes_through() {
    let mock_server = MockServer::start().await;

    let body = r#"{"data": {"children": []}}"#;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);

    client
        .fetch(SearchEngine::Reddit, "first")
        .await
        .expect("first fetch should succeed");

    tokio::time::sleep(wisp_suggest::REDDIT_MIN_INTERVAL + std::time::Duration::from_millis(50))
        .await;

    client
        .fetch(SearchEngine::Reddit, "second")
        .await
        .expect("second fetch after the interval should succeed");
}

#[tokio::test]
async fn throttle_only_applies_to_reddit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ac/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["q", ["a"]]"#))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    for _ in 0..3 {
        client
            .fetch(SearchEngine::DuckDuckGo, "q")
            .await
            .expect("unthrottled fetch should succeed");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Proxy Tests
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn proxy_receives_percent_encoded_target() {
    let mock_server = MockServer::start().await;

    // Proxy requests land on /proxy with the real endpoint URL as the
    // decoded `url` parameter.
    Mock::given(method("GET"))
        .and(path("/proxy"))
        .and(query_param(
            "url",
            "https://duckduckgo.com/ac/?q=rust&type=list",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["rust", ["proxied"]]"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config =
        SuggestConfig::default().with_proxy(format!("{}/proxy?url=", mock_server.uri()));
    let mut client = SuggestClient::new(config).expect("client should build");

    let suggestions = client
        .fetch(SearchEngine::DuckDuckGo, "rust")
        .await
        .expect("proxied fetch should succeed");

    assert_eq!(suggestions, vec!["proxied"]);
}

#[tokio::test]
async fn reddit_bypasses_the_proxy() {
    let mock_server = MockServer::start().await;

    let body = r#"{"data": {"children": []}}"#;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = SuggestConfig::default()
        .with_base_url(mock_server.uri())
        .with_proxy(format!("{}/proxy?url=", mock_server.uri()));
    let mut client = SuggestClient::new(config).expect("client should build");

    client
        .fetch(SearchEngine::Reddit, "rust")
        .await
        .expect("reddit fetch should go direct");
}
