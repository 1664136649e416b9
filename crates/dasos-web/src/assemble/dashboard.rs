use dasos_api::AcademicApi;
use dasos_common::{ApiStats, Result, Subject, SubjectFilter};
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: Option<ApiStats>,
    pub latest_year: Option<String>,
    pub subjects: Vec<Subject>,
}

/// Stats, then the first `limit` subjects of the last listed academic year.
/// Either call failing empties the whole view.
pub async fn assemble_dashboard(api: &dyn AcademicApi, limit: usize) -> DashboardView {
    match load(api, limit).await {
        Ok(view) => view,
        Err(e) => {
            error!(error = %e, "Dashboard data unavailable");
            DashboardView::default()
        }
    }
}

async fn load(api: &dyn AcademicApi, limit: usize) -> Result<DashboardView> {
    let stats = api.stats().await?;
    let latest_year = stats.latest_year().map(str::to_string);

    let filter = match &latest_year {
        Some(year) => SubjectFilter::for_year(year.clone()),
        None => SubjectFilter::default(),
    };

    let mut subjects = api.list_subjects(&filter).await?;
    subjects.truncate(limit);
    debug!(year = ?latest_year, count = subjects.len(), "Dashboard assembled");

    Ok(DashboardView { stats: Some(stats), latest_year, subjects })
}
