//! Tests for HttpMetadataClient against a local stub server.

use std::collections::HashMap;
use std::time::Duration;

use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
use serde_json::{Value, json};

use super::{EnrichmentError, HttpMetadataClient, MetadataApi};

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Echoes the query parameters back inside the metadata payload.
async fn echo_info(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "releaseDate": "16.07.2006",
        "text": format!("{}|{}", params["group"], params["song"]),
        "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
    }))
}

fn client(base_url: &str) -> HttpMetadataClient {
    HttpMetadataClient::new(base_url, Duration::from_secs(5)).expect("Client should build")
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_decodes_metadata() {
    let base = spawn_stub(Router::new().route("/info", get(echo_info))).await;

    let meta = client(&base)
        .fetch("Muse", "Supermassive Black Hole")
        .await
        .expect("Fetch should succeed");

    assert_eq!(meta.release_date, "16.07.2006");
    assert_eq!(meta.text, "Muse|Supermassive Black Hole");
    assert_eq!(meta.link, "https://www.youtube.com/watch?v=Xsp3_a-PMTw");
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_escapes_query_values() {
    let base = spawn_stub(Router::new().route("/info", get(echo_info))).await;

    let meta = client(&base)
        .fetch("AC/DC & Friends", "What?=#1")
        .await
        .unwrap();

    assert_eq!(meta.text, "AC/DC & Friends|What?=#1");
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_tolerates_trailing_slash() {
    let base = spawn_stub(Router::new().route("/info", get(echo_info))).await;

    let meta = client(&format!("{}/", base)).fetch("Muse", "Uprising").await;
    assert!(meta.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_non_success_status_is_unexpected_status() {
    let router = Router::new().route(
        "/info",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_stub(router).await;

    let result = client(&base).fetch("Muse", "Uprising").await;
    match result {
        Err(EnrichmentError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_bad_json_is_decode_error() {
    let router = Router::new().route("/info", get(|| async { "not json" }));
    let base = spawn_stub(router).await;

    let result = client(&base).fetch("Muse", "Uprising").await;
    assert!(matches!(result, Err(EnrichmentError::Decode { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_missing_field_is_decode_error() {
    let router = Router::new().route(
        "/info",
        get(|| async { Json(json!({"releaseDate": "16.07.2006", "text": "A"})) }),
    );
    let base = spawn_stub(router).await;

    let result = client(&base).fetch("Muse", "Uprising").await;
    assert!(matches!(result, Err(EnrichmentError::Decode { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{}", addr))
        .fetch("Muse", "Uprising")
        .await;
    assert!(matches!(result, Err(EnrichmentError::Transport { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_unparsable_base_url_is_invalid_request() {
    let result = client("not a url").fetch("Muse", "Uprising").await;
    assert!(matches!(result, Err(EnrichmentError::InvalidRequest { .. })));
}

#[test]
fn new_keeps_base_url() {
    let client = client("http://localhost:8080");
    assert_eq!(client.base_url(), "http://localhost:8080");
}
