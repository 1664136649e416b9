use dasos_api::search::search_hits;
use dasos_api::search_subjects;
use dasos_common::SubjectHit;
use dasos_test_utils::fixtures::subject;
use dasos_test_utils::ScriptedApi;
use pretty_assertions::assert_eq;

fn api() -> ScriptedApi {
    ScriptedApi::new().with_subjects(Ok(vec![
        subject("105000005", "Cálculo", "2023-24"),
        subject("105000007", "Álgebra", "2023-24"),
        subject("105000159", "Interacción Persona - Ordenador", "2023-24"),
    ]))
}

#[tokio::test]
async fn test_blank_query_returns_nothing_and_issues_no_request() {
    let api = api();
    assert!(search_subjects(&api, "").await.unwrap().is_empty());
    assert!(search_subjects(&api, "   ").await.unwrap().is_empty());
    assert_eq!(api.total_calls(), 0);
}

#[tokio::test]
async fn test_matches_name_or_code() {
    let api = api();

    let by_name = search_subjects(&api, "ÁLGEBRA").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].subject_code, "105000007");

    let by_code = search_hits(&api, "0001").await.unwrap();
    assert_eq!(
        by_code,
        vec![SubjectHit {
            id: "105000159".to_string(),
            name: "Interacción Persona - Ordenador".to_string(),
        }]
    );

    assert!(search_subjects(&api, "química").await.unwrap().is_empty());
    assert_eq!(api.subject_filters().len(), 3);
    assert!(api.subject_filters().iter().all(|f| f.is_empty()));
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let api = ScriptedApi::new().with_subjects(Err(503));
    assert!(search_subjects(&api, "cálculo").await.is_err());
}
