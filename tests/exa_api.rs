use devlookup::exa::{Livecrawl, SearchOptions, SearchType, TokenBudget};
use devlookup::format;
use devlookup::types::{CodeContext, ResultsPage};
use devlookup::ExaClient;
use httpmock::prelude::*;
use serde_json::json;

fn client(server: &MockServer) -> ExaClient {
    ExaClient::new("exa-test-key")
        .unwrap()
        .with_base_url(server.base_url())
}

#[tokio::test]
async fn test_search_posts_options_with_api_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/search")
                .header("x-api-key", "exa-test-key")
                .json_body(json!({
                    "query": "tokio select",
                    "type": "fast",
                    "numResults": 2,
                    "text": true,
                    "excludeDomains": ["reddit.com"]
                }));
            then.status(200).json_body(json!({
                "results": [
                    {"title": "tokio::select", "url": "https://docs.rs/tokio",
                     "publishedDate": "2024-01-01", "text": "Waits on multiple branches"},
                    {"url": "https://tokio.rs"}
                ]
            }));
        })
        .await;

    let mut options = SearchOptions::new("tokio select");
    options.search_type = SearchType::Fast;
    options.num_results = 2;
    options.text = true;
    options.exclude_domains = vec!["reddit.com".to_string()];

    let result = client(&server).search(&options).await.unwrap();
    mock.assert_async().await;

    let page = ResultsPage::from_value(result).unwrap();
    let text = format::search_results(&page.results);
    assert!(text.starts_with("## tokio::select\nURL: https://docs.rs/tokio\nDate: 2024-01-01\n"));
    assert!(text.contains("## Untitled\nURL: https://tokio.rs"));
}

#[tokio::test]
async fn test_contents_requests_text() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/contents").json_body(json!({
                "urls": ["https://a.example", "https://b.example"],
                "text": true,
                "livecrawl": "preferred"
            }));
            then.status(200).json_body(json!({"results": []}));
        })
        .await;

    let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];
    let result = client(&server)
        .contents(&urls, Some(Livecrawl::Preferred))
        .await
        .unwrap();
    mock.assert_async().await;

    let page = ResultsPage::from_value(result).unwrap();
    assert_eq!(format::contents_results(&page.results), "No content extracted");
}

#[tokio::test]
async fn test_code_context_tokens() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/context")
                .json_body(json!({"query": "reqwest retry", "tokensNum": "dynamic"}));
            then.status(200).json_body(json!({
                "response": "let client = reqwest::Client::new();",
                "resultsCount": 2,
                "outputTokens": 64
            }));
        })
        .await;

    let result = client(&server)
        .code_context("reqwest retry", Some(TokenBudget::Dynamic))
        .await
        .unwrap();
    mock.assert_async().await;

    let ctx = CodeContext::from_value(result).unwrap();
    assert_eq!(
        format::code_context(&ctx),
        "let client = reqwest::Client::new();\n---\nSources: 2 | Tokens: 64"
    );
}

#[tokio::test]
async fn test_invalid_key_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/search");
            then.status(401).json_body(json!({"error": "unauthorized"}));
        })
        .await;

    let err = client(&server)
        .search(&SearchOptions::new("anything"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid API key. Verify EXA_API_KEY is correct.");
}

#[tokio::test]
async fn test_server_error_not_retried_by_default() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/search");
            then.status(500);
        })
        .await;

    let err = client(&server)
        .search(&SearchOptions::new("anything"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Server error. Try again later.");
    mock.assert_hits_async(1).await;
}
