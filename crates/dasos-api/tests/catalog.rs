use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header::ACCEPT, HeaderMap, StatusCode, Uri};
use axum::Router;
use dasos_api::catalog::sample_document;
use dasos_api::{CatalogOutcome, CatalogRequest, CatalogSource, UpmCatalogClient};
use dasos_test_utils::closed_port_url;
use pretty_assertions::assert_eq;

type Log = Arc<Mutex<Vec<(String, String)>>>;

async fn stub(State(log): State<Log>, uri: Uri, headers: HeaderMap) -> (StatusCode, String) {
    let accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    log.lock().unwrap().push((uri.path().to_string(), accept));

    match uri.path() {
        "/api/2023-24/2S/10II_105000005.json" => (
            StatusCode::OK,
            r#"{"codigo":"105000005","nombre":"Cálculo","ects":"6","profesores":[{}]}"#.to_string(),
        ),
        "/api/2023-24/1S/10II_105000007.json" => (StatusCode::OK, "<html>".to_string()),
        "/api/2023-24/1S/10II_105000009.json" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (StatusCode::OK, "{}".to_string())
        }
        _ => (StatusCode::SERVICE_UNAVAILABLE, String::new()),
    }
}

async fn spawn_stub() -> (SocketAddr, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(stub).with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve stub") });
    (addr, log)
}

fn with_sample(base: &str) -> UpmCatalogClient {
    UpmCatalogClient::new(base, 30, Some(sample_document().unwrap())).unwrap()
}

#[tokio::test]
async fn test_live_document_uses_positional_path() {
    let (addr, log) = spawn_stub().await;
    let client = with_sample(&format!("http://{}/api", addr));

    let request = CatalogRequest::new("105000005", "2023/24", "2S", "10II");
    let outcome = client.subject_detail(&request).await;

    assert!(outcome.is_live());
    let doc = outcome.document().unwrap();
    assert_eq!(doc.nombre, "Cálculo");
    assert_eq!(doc.listed_professors().count(), 0);
    assert_eq!(
        *log.lock().unwrap(),
        vec![("/api/2023-24/2S/10II_105000005.json".to_string(), "application/json".to_string())]
    );
}

#[tokio::test]
async fn test_non_success_and_malformed_fall_back() {
    let (addr, _log) = spawn_stub().await;
    let client = with_sample(&format!("http://{}/api", addr));

    let unavailable = client
        .subject_detail(&CatalogRequest::new("105000006", "2023-24", "1S", "10II"))
        .await;
    assert!(unavailable.is_fallback());

    let malformed = client
        .subject_detail(&CatalogRequest::new("105000007", "2023-24", "1S", "10II"))
        .await;
    assert!(malformed.is_fallback());
}

#[tokio::test]
async fn test_failing_network_returns_identical_fallback() {
    let client = with_sample(&closed_port_url());
    let request = CatalogRequest::new("105000005", "2023-24", "2S", "10II");

    let first = client.subject_detail(&request).await;
    let second = client.subject_detail(&request).await;

    assert!(first.is_fallback());
    assert_eq!(first, second);
    assert_eq!(first.document(), Some(&sample_document().unwrap()));
}

#[tokio::test]
async fn test_without_fallback_is_not_available() {
    let client = UpmCatalogClient::new(&closed_port_url(), 30, None).unwrap();
    let outcome = client
        .subject_detail(&CatalogRequest::new("105000005", "2023-24", "2S", "10II"))
        .await;
    assert_eq!(outcome, CatalogOutcome::NotAvailable);
    assert!(outcome.document().is_none());
}

#[tokio::test]
async fn test_slow_host_times_out_to_fallback() {
    let (addr, _log) = spawn_stub().await;
    let client = UpmCatalogClient::new(
        &format!("http://{}/api", addr),
        1,
        Some(sample_document().unwrap()),
    )
    .unwrap();

    let started = Instant::now();
    let outcome = client
        .subject_detail(&CatalogRequest::new("105000009", "2023-24", "1S", "10II"))
        .await;

    assert!(outcome.is_fallback());
    assert!(started.elapsed() < Duration::from_secs(4));
}
