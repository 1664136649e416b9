use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use dasos_api::catalog::sample_document;
use dasos_api::CatalogOutcome;
use dasos_config::Config;
use dasos_test_utils::fixtures::{stats, subject, subjects_in_year};
use dasos_test_utils::{ScriptedApi, ScriptedCatalog};
use dasos_web::router::build_router;
use dasos_web::session::{encode_cookie_value, Session};
use dasos_web::state::AppState;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(api: Arc<ScriptedApi>, catalog: ScriptedCatalog) -> Router {
    let mut config = Config::default();
    config.server.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string();
    let state = AppState::new(config, api, Arc::new(catalog)).unwrap();
    build_router(state)
}

fn app(api: ScriptedApi) -> Router {
    app_with(Arc::new(api), ScriptedCatalog::unavailable())
}

fn session_cookie() -> String {
    format!("user={}", encode_cookie_value(&Session::for_email("alumno@upm.es")))
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn signed_in(uri: &str) -> Request<Body> {
    Request::get(uri).header(COOKIE, session_cookie()).body(Body::empty()).unwrap()
}

fn login(body: &str) -> Request<Body> {
    Request::post("/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &Response) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

async fn text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_pages_without_session_redirect_to_login() {
    for path in ["/dashboard", "/dashboard/subjectdata/105000005", "/dashboard/profile"] {
        let response = app(ScriptedApi::new()).oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn test_login_page_is_public() {
    let response = app(ScriptedApi::new()).oneshot(get("/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("name=\"password\""));
}

#[tokio::test]
async fn test_valid_login_sets_session_cookie() {
    let response = app(ScriptedApi::new())
        .oneshot(login("email=alumno%40upm.es&password=secreto"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("user="), "{}", cookie);
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
}

#[tokio::test]
async fn test_invalid_login_rerenders_form() {
    let response = app(ScriptedApi::new())
        .oneshot(login("email=alumno&password=secreto"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_empty());
    let body = text(response).await;
    assert!(body.contains("Email inválido"));
    assert!(body.contains("value=\"alumno\""));

    let response = app(ScriptedApi::new())
        .oneshot(login("email=alumno%40upm.es&password="))
        .await
        .unwrap();
    assert!(text(response).await.contains("Contraseña requerida"));
}

#[tokio::test]
async fn test_session_on_login_redirects_to_dashboard() {
    let response = app(ScriptedApi::new()).oneshot(signed_in("/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_malformed_cookie_is_removed() {
    let request = Request::get("/dashboard")
        .header(COOKIE, "user=not-a-session")
        .body(Body::empty())
        .unwrap();

    let response = app(ScriptedApi::new()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("user="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let request = Request::post("/logout")
        .header(COOKIE, session_cookie())
        .body(Body::empty())
        .unwrap();

    let response = app(ScriptedApi::new()).oneshot(request).await.unwrap();

    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response).contains("Max-Age=0"));
}

#[tokio::test]
async fn test_root_redirects_to_dashboard() {
    let response = app(ScriptedApi::new()).oneshot(signed_in("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_dashboard_renders_recent_subjects() {
    let api = ScriptedApi::new()
        .with_stats(Ok(stats(&["2022-23", "2023-24"])))
        .with_subjects(Ok(subjects_in_year("2023-24", 8)));

    let response = app(api).oneshot(signed_in("/dashboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await;
    assert!(body.contains("Asignatura 6"));
    assert!(!body.contains("Asignatura 7"));
    assert!(body.contains("alumno"));
}

#[tokio::test]
async fn test_dashboard_with_api_down_shows_empty_state() {
    let api = ScriptedApi::new().with_stats(Err(500));

    let response = app(api).oneshot(signed_in("/dashboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("No hay datos de asignaturas disponibles"));
}

#[tokio::test]
async fn test_subject_list_page_renders() {
    let api = ScriptedApi::new()
        .with_stats(Ok(stats(&["2023-24"])))
        .with_subjects(Ok(subjects_in_year("2023-24", 2)));

    let response = app(api)
        .oneshot(signed_in("/dashboard/subjectdata?academic_year=2023-24&sort=enrolled"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await;
    assert!(body.contains("Asignatura 2"));
    assert!(body.contains("value=\"enrolled\" selected"));
}

#[tokio::test]
async fn test_unknown_subject_is_404() {
    let api = Arc::new(ScriptedApi::new());

    let response = app_with(api.clone(), ScriptedCatalog::unavailable())
        .oneshot(signed_in("/dashboard/subjectdata/000000000"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text(response).await.contains("000000000"));
    assert_eq!(api.total_calls(), 1);
}

#[tokio::test]
async fn test_subject_detail_renders_with_failed_section() {
    let api = ScriptedApi::new()
        .with_subject(Ok(Some(subject("105000005", "Cálculo", "2023-24"))))
        .with_historical(Err(500))
        .with_subject_insights(Err(500));

    let response = app(api).oneshot(signed_in("/dashboard/subjectdata/105000005")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await;
    assert!(body.contains("Cálculo"));
    assert!(body.contains("Datos históricos no disponibles"));
    assert!(body.contains("El análisis no está disponible"));
}

#[tokio::test]
async fn test_subject_info_with_sample_document() {
    let api = Arc::new(ScriptedApi::new().with_subject(Ok(Some(subject("105000005", "Cálculo", "2023-24")))));
    let catalog = ScriptedCatalog::new(CatalogOutcome::Fallback(sample_document().unwrap()));

    let response = app_with(api, catalog)
        .oneshot(signed_in("/dashboard/subjectdata/105000005/info"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("datos de ejemplo"));
}

#[tokio::test]
async fn test_subject_info_without_catalog() {
    let api = ScriptedApi::new().with_subject(Ok(Some(subject("105000005", "Cálculo", "2023-24"))));

    let response = app(api)
        .oneshot(signed_in("/dashboard/subjectdata/105000005/info"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await;
    assert!(body.contains("No se pudieron cargar los datos detallados"));
    assert!(body.contains("href=\"/dashboard/subjectdata/105000005\""));
}

#[tokio::test]
async fn test_profile_shows_session() {
    let response = app(ScriptedApi::new()).oneshot(signed_in("/dashboard/profile")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await;
    assert!(body.contains("Perfil de Usuario"));
    assert!(body.contains("alumno@upm.es"));
}

#[tokio::test]
async fn test_search_endpoint() {
    let api = Arc::new(ScriptedApi::new().with_subjects(Ok(vec![
        subject("105000005", "Cálculo", "2023-24"),
        subject("105000007", "Física", "2023-24"),
    ])));

    let response = app_with(api.clone(), ScriptedCatalog::unavailable())
        .oneshot(get("/api/subjects?query=%20"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let hits: Value = serde_json::from_str(&text(response).await).unwrap();
    assert_eq!(hits, json!([]));
    assert_eq!(api.total_calls(), 0);

    let response = app_with(api.clone(), ScriptedCatalog::unavailable())
        .oneshot(get("/api/subjects?query=c%C3%A1lc"))
        .await
        .unwrap();
    let hits: Value = serde_json::from_str(&text(response).await).unwrap();
    assert_eq!(hits, json!([{ "id": "105000005", "name": "Cálculo" }]));
}

#[tokio::test]
async fn test_search_failure_is_500() {
    let api = ScriptedApi::new().with_subjects(Err(502));

    let response = app(api).oneshot(get("/api/subjects?query=calc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&text(response).await).unwrap();
    assert_eq!(body, json!({ "error": "Failed to search subjects" }));
}

#[tokio::test]
async fn test_health_and_static_skip_guard() {
    let response = app(ScriptedApi::new()).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&text(response).await).unwrap();
    assert_eq!(body["status"], "ok");

    let response = app(ScriptedApi::new()).oneshot(get("/static/js/search.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_is_404_page() {
    let response = app(ScriptedApi::new()).oneshot(signed_in("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app(ScriptedApi::new()).oneshot(get("/reset-password")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
