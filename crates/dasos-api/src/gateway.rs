//! The logical query surface of the academic analytics API.

use async_trait::async_trait;
use dasos_common::{
    ApiStats, EvaluationChange, FacultyChange, GlobalInsights, HistoricalRate,
    PerformanceCorrelation, Result, Subject, SubjectFilter, SubjectInsights,
};

/// One method per remote endpoint. Implementations must not cache.
#[async_trait]
pub trait AcademicApi: Send + Sync {
    /// `GET /subjects[?academic_year=&semester=]`
    async fn list_subjects(&self, filter: &SubjectFilter) -> Result<Vec<Subject>>;

    /// `GET /subjects/{code}[?academic_year=]`. `Ok(None)` is the not-found signal.
    async fn get_subject(&self, code: &str, academic_year: Option<&str>) -> Result<Option<Subject>>;

    /// `GET /subjects/{code}/historical[?rate_type=]`
    async fn historical_rates(&self, code: &str, rate_type: Option<&str>) -> Result<Vec<HistoricalRate>>;

    /// `GET /faculty/changes[?subject_code=]`
    async fn faculty_changes(&self, code: Option<&str>) -> Result<Vec<FacultyChange>>;

    /// `GET /evaluation/changes[?subject_code=]`
    async fn evaluation_changes(&self, code: Option<&str>) -> Result<Vec<EvaluationChange>>;

    /// `GET /correlations[?subject_code=]`
    async fn correlations(&self, code: Option<&str>) -> Result<Vec<PerformanceCorrelation>>;

    /// `GET /insights/subjects[?subject_code=&analysis_id=]`
    async fn subject_insights(
        &self,
        code: Option<&str>,
        analysis_id: Option<i64>,
    ) -> Result<Vec<SubjectInsights>>;

    /// `GET /insights/global`
    async fn global_insights(&self) -> Result<GlobalInsights>;

    /// `GET /stats`
    async fn stats(&self) -> Result<ApiStats>;
}

/// Query string builder that drops absent and blank values, so an unset
/// filter never turns into `key=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opt(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.0.push((key, v.to_string()));
        }
        self
    }

    pub fn opt_num(self, key: &'static str, value: Option<i64>) -> Self {
        let rendered = value.map(|v| v.to_string());
        self.opt(key, rendered.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, String)> {
        self.0.iter()
    }
}

impl From<&SubjectFilter> for QueryParams {
    fn from(filter: &SubjectFilter) -> Self {
        QueryParams::new()
            .opt("academic_year", filter.academic_year.as_deref())
            .opt("semester", filter.semester.as_deref())
    }
}
