use devlookup::format::{package_report, version_report};
use devlookup::{DepsDevClient, System};
use httpmock::prelude::*;
use serde_json::json;

fn client(server: &MockServer) -> DepsDevClient {
    DepsDevClient::new().unwrap().with_base_url(server.base_url())
}

#[tokio::test]
async fn test_package_lookup() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/CARGO/packages/serde");
            then.status(200).json_body(json!({
                "packageKey": {"system": "CARGO", "name": "serde"},
                "versions": [
                    {"versionKey": {"version": "1.0.209"}, "isDefault": false},
                    {"versionKey": {"version": "1.0.210"}, "isDefault": true}
                ]
            }));
        })
        .await;

    let info = client(&server).package(System::Cargo, "serde").await.unwrap();
    mock.assert_async().await;

    assert_eq!(
        package_report(&info, System::Cargo, "serde", false),
        "Package: serde\nSystem: CARGO\nLatest: 1.0.210"
    );
}

#[tokio::test]
async fn test_version_lookup() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/systems/PYPI/packages/flask/versions/3.0.3");
            then.status(200).json_body(json!({
                "versionKey": {"system": "PYPI", "name": "flask", "version": "3.0.3"},
                "publishedAt": "2024-04-07T19:26:08Z",
                "isDefault": true,
                "licenses": ["BSD-3-Clause"],
                "advisoryKeys": []
            }));
        })
        .await;

    let detail = client(&server)
        .version(System::Pypi, "flask", "3.0.3")
        .await
        .unwrap();
    mock.assert_async().await;

    let report = version_report(&detail, System::Pypi, "flask", "3.0.3");
    assert!(report.contains("Published: 2024-04-07T19:26:08Z"));
    assert!(report.contains("Default: true"));
    assert!(report.contains("Licenses: BSD-3-Clause"));
    assert!(!report.contains("Advisories"));
}

#[tokio::test]
async fn test_missing_package_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/NPM/packages/not-a-real-pkg");
            then.status(404).json_body(json!({"code": 5, "message": "package not found"}));
        })
        .await;

    let err = client(&server)
        .package_json(System::Npm, "not-a-real-pkg")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Package not found. Check spelling and ecosystem."
    );
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_raw_json_is_passed_through() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/systems/GO/packages/golang.org");
            then.status(200)
                .json_body(json!({"packageKey": {"name": "golang.org/x/net"}, "versions": []}));
        })
        .await;

    let raw = client(&server)
        .package_json(System::Go, "golang.org/x/net")
        .await
        .unwrap();
    assert_eq!(raw["packageKey"]["name"], "golang.org/x/net");
    mock.assert_hits_async(1).await;
}
