//! Subject search, composed from the full listing plus an in-memory filter.

use dasos_common::{Result, Subject, SubjectFilter, SubjectHit};
use tracing::debug;

use crate::gateway::AcademicApi;

/// Case-insensitive substring match on the name, or substring match on the code.
pub fn subject_matches(subject: &Subject, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    subject.subject_name.to_lowercase().contains(&needle)
        || subject.subject_code.to_lowercase().contains(&needle)
}

/// Blank queries return nothing and issue no request.
pub async fn search_subjects(api: &dyn AcademicApi, query: &str) -> Result<Vec<Subject>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let subjects = api.list_subjects(&SubjectFilter::default()).await?;
    let hits: Vec<Subject> = subjects
        .into_iter()
        .filter(|s| subject_matches(s, query))
        .collect();

    debug!(query, hits = hits.len(), "Subject search");
    Ok(hits)
}

/// Search reshaped for the search box: `[{id, name}]`.
pub async fn search_hits(api: &dyn AcademicApi, query: &str) -> Result<Vec<SubjectHit>> {
    let subjects = search_subjects(api, query).await?;
    Ok(subjects.iter().map(SubjectHit::from).collect())
}
