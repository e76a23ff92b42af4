//! HTTP List Store Unit Tests
//!
//! Uses wiremock for HTTP mocking to test:
//! - Request formatting (select clause, accept header, bearer token)
//! - Response parsing (arrays, delimited text)
//! - Status error mapping

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::power_store::{HttpListStore, ListFields, PowerStore, StoreError};

const ITEMS_PATH: &str = "/_api/web/lists/getbytitle('Powers')/items";

fn store(server: &MockServer) -> HttpListStore {
    HttpListStore::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_parses_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEMS_PATH))
        .and(query_param("$select", "Title,Icons,Colors,NamePrefixes,NameMains"))
        .and(header("accept", "application/json;odata=nometadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {
                    "Title": "Flight",
                    "Icons": "Plane\nCloud",
                    "Colors": ["#F00", "white"],
                    "NamePrefixes": "Captain;Sky",
                    "NameMains": ["Falcon"]
                },
                {
                    "Title": "Strength",
                    "Icons": ["Fist"],
                    "Colors": "#00F",
                    "NamePrefixes": null,
                    "NameMains": "Anvil, Giant"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = store(&mock_server)
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].icons, vec!["Plane", "Cloud"]);
    assert_eq!(records[0].colors, vec!["#F00", "white"]);
    assert_eq!(records[0].name_prefixes, vec!["Captain", "Sky"]);
    assert!(records[1].name_prefixes.is_empty());
    assert_eq!(records[1].name_mains, vec!["Anvil", "Giant"]);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEMS_PATH))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = store(&mock_server)
        .with_access_token("secret-token")
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_custom_fields_in_select() {
    let mock_server = MockServer::start().await;
    let fields = ListFields {
        title: "PowerName".to_string(),
        icons: "IconNames".to_string(),
        ..Default::default()
    };

    Mock::given(method("GET"))
        .and(path(ITEMS_PATH))
        .and(query_param(
            "$select",
            "PowerName,IconNames,Colors,NamePrefixes,NameMains",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "PowerName": "Speed", "IconNames": "Running" }]
        })))
        .mount(&mock_server)
        .await;

    let records = store(&mock_server).fetch_all("Powers", &fields).await.unwrap();
    assert_eq!(records[0].title, "Speed");
    assert_eq!(records[0].icons, vec!["Running"]);
}

#[tokio::test]
async fn test_missing_list_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = store(&mock_server)
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ListNotFound { .. }));
}

#[tokio::test]
async fn test_server_error_is_surfaced_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = store(&mock_server)
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap_err();

    match &err {
        StoreError::Status { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_row_without_title_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "Icons": "Plane" }, { "Title": "Strength", "Icons": "Fist" }]
        })))
        .mount(&mock_server)
        .await;

    let records = store(&mock_server)
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Strength");
}

#[tokio::test]
async fn test_non_json_body_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    let err = store(&mock_server)
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Http(_)));
}
