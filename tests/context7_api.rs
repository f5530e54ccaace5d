use devlookup::context7::{Docs, DocsFormat};
use devlookup::{Context7Client, LookupError, RetryPolicy};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(5),
    }
}

fn client(server: &MockServer) -> Context7Client {
    Context7Client::new("ctx7sk-test-key")
        .unwrap()
        .with_base_url(server.base_url())
        .with_retry_policy(fast_retry())
}

#[tokio::test]
async fn test_search_sends_bearer_and_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/libs/search")
                .header("authorization", "Bearer ctx7sk-test-key")
                .query_param("libraryName", "react")
                .query_param("query", "hooks");
            then.status(200).json_body(json!({
                "results": [{"id": "/facebook/react", "title": "React"}]
            }));
        })
        .await;

    let result = client(&server).search_libraries("react", "hooks").await.unwrap();

    assert_eq!(result["results"][0]["id"], "/facebook/react");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_docs_plain_text() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/context")
                .query_param("libraryId", "/facebook/react")
                .query_param("query", "useEffect")
                .query_param("type", "txt");
            then.status(200)
                .header("content-type", "text/plain; charset=utf-8")
                .body("### useEffect\nRuns after render.");
        })
        .await;

    let docs = client(&server)
        .docs("/facebook/react", "useEffect", DocsFormat::Txt)
        .await
        .unwrap();

    assert_eq!(docs, Docs::Text("### useEffect\nRuns after render.".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_docs_json_when_server_says_json() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/context").query_param("type", "json");
            then.status(200).json_body(json!({"snippets": [{"title": "useState"}]}));
        })
        .await;

    let docs = client(&server)
        .docs("/facebook/react", "state", DocsFormat::Json)
        .await
        .unwrap();

    match docs {
        Docs::Json(value) => assert_eq!(value["snippets"][0]["title"], "useState"),
        other => panic!("expected JSON docs, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_maps_to_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/context");
            then.status(404).body("missing");
        })
        .await;

    let err = client(&server)
        .docs("/nobody/nothing", "x", DocsFormat::Txt)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.to_string(),
        "Library not found. Use 'search' to find the correct library ID."
    );
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_unavailable_retried_three_times() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/libs/search");
            then.status(503);
        })
        .await;

    let err = client(&server).search_libraries("react", "hooks").await.unwrap_err();

    assert_eq!(err.to_string(), "Service unavailable. Try again later.");
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_rate_limit_retried_then_reported() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/libs/search");
            then.status(429);
        })
        .await;

    let err = client(&server).search_libraries("react", "hooks").await.unwrap_err();

    assert!(matches!(err, LookupError::RateLimited { .. }));
    assert_eq!(err.to_string(), "Rate limit exceeded. Wait before retrying.");
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_not_finalized_is_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/context");
            then.status(202).body("processing");
        })
        .await;

    let err = client(&server)
        .docs("/new/library", "intro", DocsFormat::Txt)
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::NotFinalized { .. }));
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_bad_request_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/libs/search");
            then.status(400);
        })
        .await;

    let err = client(&server).search_libraries("", "").await.unwrap_err();

    assert_eq!(err.to_string(), "Bad request. Check parameters.");
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_moved_library_reports_redirect() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/context");
            then.status(301).json_body(json!({"redirectUrl": "/vercel/next.js"}));
        })
        .await;

    let err = client(&server)
        .docs("/zeit/next.js", "routing", DocsFormat::Txt)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Library moved to /vercel/next.js");
}

#[tokio::test]
async fn test_unknown_status_uses_reason_phrase() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/libs/search");
            then.status(418);
        })
        .await;

    let err = client(&server).search_libraries("tea", "pot").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 418: I'm a teapot");
}

#[tokio::test]
async fn test_retry_after_header_overrides_backoff() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/libs/search");
            then.status(429).header("Retry-After", "0");
        })
        .await;

    // Standard policy would wait 1s then 2s without the header.
    let client = Context7Client::new("ctx7sk-test-key")
        .unwrap()
        .with_base_url(server.base_url());
    let started = std::time::Instant::now();
    let err = client.search_libraries("react", "hooks").await.unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::ZERO));
    assert!(started.elapsed() < Duration::from_secs(1));
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_search_plain_text_body_returned_as_string() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/libs/search");
            then.status(200)
                .header("content-type", "text/plain")
                .body("no libraries matched");
        })
        .await;

    let result = client(&server).search_libraries("zzz", "q").await.unwrap();
    assert_eq!(result, json!("no libraries matched"));
}
