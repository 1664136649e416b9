use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Router;
use dasos_api::{AcademicApi, HttpGateway};
use dasos_common::{DasosError, SubjectFilter};
use dasos_test_utils::closed_port_url;
use pretty_assertions::assert_eq;

type Log = Arc<Mutex<Vec<String>>>;

const SUBJECT: &str = r#"{"subject_code":"105000005","subject_name":"Cálculo","credits":6,
    "academic_year":"2023-24","semester":"Primero","performance_rate":62.5}"#;

async fn stub(State(log): State<Log>, uri: Uri) -> (StatusCode, String) {
    log.lock().unwrap().push(uri.to_string());
    match uri.path() {
        "/api/v1/subjects" => (StatusCode::OK, format!("[{}, null]", SUBJECT)),
        "/api/v1/subjects/105000005" => (StatusCode::OK, SUBJECT.to_string()),
        "/api/v1/subjects/105000099" => (StatusCode::OK, "null".to_string()),
        "/api/v1/faculty/changes" => (StatusCode::OK, "null".to_string()),
        "/api/v1/correlations" => (StatusCode::OK, "{not json".to_string()),
        "/api/v1/stats" => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
        _ => (StatusCode::NOT_FOUND, String::new()),
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

fn gateway(addr: SocketAddr) -> HttpGateway {
    HttpGateway::new(&format!("http://{}/api/v1", addr), 5).unwrap()
}

#[tokio::test]
async fn test_absent_filters_send_no_query_and_null_rows_are_dropped() {
    let (addr, log) = spawn_stub().await;
    let api = gateway(addr);

    let rows = api.list_subjects(&SubjectFilter::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].performance_rate, Some(62.5));

    let blank = SubjectFilter { academic_year: Some(String::new()), semester: None };
    api.list_subjects(&blank).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["/api/v1/subjects", "/api/v1/subjects"]);
}

#[tokio::test]
async fn test_present_filters_are_encoded() {
    let (addr, log) = spawn_stub().await;
    let api = gateway(addr);

    let filter = SubjectFilter::for_year("2023-24").with_semester("Segundo");
    api.list_subjects(&filter).await.unwrap();
    api.faculty_changes(Some("105 000")).await.unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "/api/v1/subjects?academic_year=2023-24&semester=Segundo",
            "/api/v1/faculty/changes?subject_code=105+000",
        ]
    );
}

#[tokio::test]
async fn test_not_found_and_null_body_are_none() {
    let (addr, _log) = spawn_stub().await;
    let api = gateway(addr);

    let found = api.get_subject("105000005", None).await.unwrap();
    assert_eq!(found.map(|s| s.subject_name), Some("Cálculo".to_string()));

    assert!(api.get_subject("000000000", None).await.unwrap().is_none());
    assert!(api.get_subject("105000099", None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_null_list_body_is_empty() {
    let (addr, _log) = spawn_stub().await;
    let rows = gateway(addr).faculty_changes(None).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_error_taxonomy() {
    let (addr, _log) = spawn_stub().await;
    let api = gateway(addr);

    match api.stats().await {
        Err(DasosError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/v1/stats"));
        }
        other => panic!("expected status error, got {:?}", other),
    }

    assert!(matches!(api.correlations(None).await, Err(DasosError::Decode(_))));

    let err = api.global_insights().await.unwrap_err();
    assert!(err.is_not_found());

    let offline = HttpGateway::new(&closed_port_url(), 5).unwrap();
    assert!(matches!(offline.stats().await, Err(DasosError::Http(_))));
}
