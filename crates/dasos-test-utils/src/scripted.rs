//! In-memory gateway and catalog with canned replies and a call log.

use std::sync::Mutex;

use async_trait::async_trait;
use dasos_api::{AcademicApi, CatalogOutcome, CatalogRequest, CatalogSource};
use dasos_common::{
    ApiStats, DasosError, EvaluationChange, FacultyChange, GlobalInsights, HistoricalRate,
    PerformanceCorrelation, Result, Subject, SubjectFilter, SubjectInsights,
};

/// Canned reply: the payload, or the HTTP status the call fails with.
pub type Reply<T> = std::result::Result<T, u16>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub endpoint: &'static str,
    /// Subject code, or the academic year for `list_subjects`.
    pub arg: Option<String>,
}

/// Every endpoint answers its scripted reply. Unscripted endpoints answer
/// with empty data (`get_subject` with not-found, `global_insights` with 404).
pub struct ScriptedApi {
    subjects: Reply<Vec<Subject>>,
    subject: Reply<Option<Subject>>,
    historical: Reply<Vec<HistoricalRate>>,
    faculty: Reply<Vec<FacultyChange>>,
    evaluation: Reply<Vec<EvaluationChange>>,
    correlations: Reply<Vec<PerformanceCorrelation>>,
    subject_insights: Reply<Vec<SubjectInsights>>,
    global_insights: Reply<GlobalInsights>,
    stats: Reply<ApiStats>,
    calls: Mutex<Vec<ApiCall>>,
    filters: Mutex<Vec<SubjectFilter>>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            subjects: Ok(Vec::new()),
            subject: Ok(None),
            historical: Ok(Vec::new()),
            faculty: Ok(Vec::new()),
            evaluation: Ok(Vec::new()),
            correlations: Ok(Vec::new()),
            subject_insights: Ok(Vec::new()),
            global_insights: Err(404),
            stats: Ok(ApiStats::default()),
            calls: Mutex::new(Vec::new()),
            filters: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subjects(mut self, reply: Reply<Vec<Subject>>) -> Self {
        self.subjects = reply;
        self
    }

    pub fn with_subject(mut self, reply: Reply<Option<Subject>>) -> Self {
        self.subject = reply;
        self
    }

    pub fn with_historical(mut self, reply: Reply<Vec<HistoricalRate>>) -> Self {
        self.historical = reply;
        self
    }

    pub fn with_faculty(mut self, reply: Reply<Vec<FacultyChange>>) -> Self {
        self.faculty = reply;
        self
    }

    pub fn with_evaluation(mut self, reply: Reply<Vec<EvaluationChange>>) -> Self {
        self.evaluation = reply;
        self
    }

    pub fn with_correlations(mut self, reply: Reply<Vec<PerformanceCorrelation>>) -> Self {
        self.correlations = reply;
        self
    }

    pub fn with_subject_insights(mut self, reply: Reply<Vec<SubjectInsights>>) -> Self {
        self.subject_insights = reply;
        self
    }

    pub fn with_global_insights(mut self, reply: Reply<GlobalInsights>) -> Self {
        self.global_insights = reply;
        self
    }

    pub fn with_stats(mut self, reply: Reply<ApiStats>) -> Self {
        self.stats = reply;
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.endpoint == endpoint).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Filters passed to `list_subjects`, in call order.
    pub fn subject_filters(&self) -> Vec<SubjectFilter> {
        self.filters.lock().unwrap().clone()
    }

    fn record<T: Clone>(&self, endpoint: &'static str, arg: Option<&str>, reply: &Reply<T>) -> Result<T> {
        self.calls.lock().unwrap().push(ApiCall {
            endpoint,
            arg: arg.map(str::to_string),
        });
        reply.clone().map_err(|status| DasosError::Status {
            status,
            url: format!("scripted://{}", endpoint),
        })
    }
}

#[async_trait]
impl AcademicApi for ScriptedApi {
    async fn list_subjects(&self, filter: &SubjectFilter) -> Result<Vec<Subject>> {
        self.filters.lock().unwrap().push(filter.clone());
        self.record("list_subjects", filter.academic_year.as_deref(), &self.subjects)
    }

    async fn get_subject(&self, code: &str, _academic_year: Option<&str>) -> Result<Option<Subject>> {
        self.record("get_subject", Some(code), &self.subject)
    }

    async fn historical_rates(&self, code: &str, _rate_type: Option<&str>) -> Result<Vec<HistoricalRate>> {
        self.record("historical_rates", Some(code), &self.historical)
    }

    async fn faculty_changes(&self, code: Option<&str>) -> Result<Vec<FacultyChange>> {
        self.record("faculty_changes", code, &self.faculty)
    }

    async fn evaluation_changes(&self, code: Option<&str>) -> Result<Vec<EvaluationChange>> {
        self.record("evaluation_changes", code, &self.evaluation)
    }

    async fn correlations(&self, code: Option<&str>) -> Result<Vec<PerformanceCorrelation>> {
        self.record("correlations", code, &self.correlations)
    }

    async fn subject_insights(
        &self,
        code: Option<&str>,
        _analysis_id: Option<i64>,
    ) -> Result<Vec<SubjectInsights>> {
        self.record("subject_insights", code, &self.subject_insights)
    }

    async fn global_insights(&self) -> Result<GlobalInsights> {
        self.record("global_insights", None, &self.global_insights)
    }

    async fn stats(&self) -> Result<ApiStats> {
        self.record("stats", None, &self.stats)
    }
}

/// Catalog that always answers the same outcome and records each request.
pub struct ScriptedCatalog {
    outcome: CatalogOutcome,
    requests: Mutex<Vec<CatalogRequest>>,
}

impl ScriptedCatalog {
    pub fn new(outcome: CatalogOutcome) -> Self {
        Self { outcome, requests: Mutex::new(Vec::new()) }
    }

    pub fn unavailable() -> Self {
        Self::new(CatalogOutcome::NotAvailable)
    }

    pub fn requests(&self) -> Vec<CatalogRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn subject_detail(&self, request: &CatalogRequest) -> CatalogOutcome {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}
