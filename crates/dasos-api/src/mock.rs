//! Fixed payloads served instead of network calls when `use_mock_data` is on.

use async_trait::async_trait;
use dasos_common::{
    ApiStats, EvaluationChange, FacultyChange, GlobalInsights, HistoricalRate,
    PerformanceCorrelation, Result, Subject, SubjectFilter, SubjectInsights,
};
use serde::Deserialize;
use tracing::debug;

use crate::gateway::AcademicApi;

const MOCK_PAYLOADS: &str = include_str!("../fixtures/mock_api.json");

#[derive(Debug, Clone, Deserialize)]
struct MockPayloads {
    subjects: Vec<Subject>,
    subject_detail: Subject,
    historical: Vec<HistoricalRate>,
    faculty_changes: Vec<FacultyChange>,
    evaluation_changes: Vec<EvaluationChange>,
    correlations: Vec<PerformanceCorrelation>,
    global_insights: GlobalInsights,
    subject_insights: Vec<SubjectInsights>,
    stats: ApiStats,
}

#[derive(Debug, Clone)]
pub struct MockGateway {
    data: MockPayloads,
}

impl MockGateway {
    pub fn new() -> Result<Self> {
        let data: MockPayloads = serde_json::from_str(MOCK_PAYLOADS)?;
        Ok(Self { data })
    }
}

fn field_matches(value: &str, wanted: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        Some(w) => value.eq_ignore_ascii_case(w),
        None => true,
    }
}

fn for_subject<T: Clone>(rows: &[T], code: Option<&str>, key: impl Fn(&T) -> &str) -> Vec<T> {
    rows.iter().filter(|r| field_matches(key(r), code)).cloned().collect()
}

#[async_trait]
impl AcademicApi for MockGateway {
    async fn list_subjects(&self, filter: &SubjectFilter) -> Result<Vec<Subject>> {
        let rows: Vec<Subject> = self
            .data
            .subjects
            .iter()
            .filter(|s| field_matches(&s.academic_year, filter.academic_year.as_deref()))
            .filter(|s| field_matches(&s.semester, filter.semester.as_deref()))
            .cloned()
            .collect();
        debug!(count = rows.len(), "mock: subjects");
        Ok(rows)
    }

    async fn get_subject(&self, code: &str, _academic_year: Option<&str>) -> Result<Option<Subject>> {
        if self.data.subject_detail.subject_code == code {
            return Ok(Some(self.data.subject_detail.clone()));
        }
        Ok(self.data.subjects.iter().find(|s| s.subject_code == code).cloned())
    }

    async fn historical_rates(&self, code: &str, rate_type: Option<&str>) -> Result<Vec<HistoricalRate>> {
        Ok(self
            .data
            .historical
            .iter()
            .filter(|r| r.subject_code == code && field_matches(r.rate_type.as_str(), rate_type))
            .cloned()
            .collect())
    }

    async fn faculty_changes(&self, code: Option<&str>) -> Result<Vec<FacultyChange>> {
        Ok(for_subject(&self.data.faculty_changes, code, |r| r.subject_code.as_str()))
    }

    async fn evaluation_changes(&self, code: Option<&str>) -> Result<Vec<EvaluationChange>> {
        Ok(for_subject(&self.data.evaluation_changes, code, |r| r.subject_code.as_str()))
    }

    async fn correlations(&self, code: Option<&str>) -> Result<Vec<PerformanceCorrelation>> {
        Ok(for_subject(&self.data.correlations, code, |r| r.subject_code.as_str()))
    }

    async fn subject_insights(
        &self,
        code: Option<&str>,
        analysis_id: Option<i64>,
    ) -> Result<Vec<SubjectInsights>> {
        Ok(for_subject(&self.data.subject_insights, code, |r| r.subject_code.as_str())
            .into_iter()
            .filter(|r| analysis_id.map_or(true, |id| r.analysis_id == id))
            .collect())
    }

    async fn global_insights(&self) -> Result<GlobalInsights> {
        Ok(self.data.global_insights.clone())
    }

    async fn stats(&self) -> Result<ApiStats> {
        Ok(self.data.stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixtures_parse_and_filter() {
        let api = MockGateway::new().unwrap();

        let all = api.list_subjects(&SubjectFilter::default()).await.unwrap();
        assert_eq!(all.len(), 5);

        let none = api.list_subjects(&SubjectFilter::for_year("2019-20")).await.unwrap();
        assert!(none.is_empty());

        let detail = api.get_subject("105000005", None).await.unwrap().unwrap();
        assert_eq!(detail.total_enrolled, Some(455));
        assert!(api.get_subject("000000000", None).await.unwrap().is_none());

        let exito = api.historical_rates("105000005", Some("éxito")).await.unwrap();
        assert_eq!(exito.len(), 4);

        let stats = api.stats().await.unwrap();
        assert_eq!(stats.latest_year(), Some("2023-24"));
    }

    #[tokio::test]
    async fn test_mock_insights_decode() {
        let api = MockGateway::new().unwrap();
        let global = api.global_insights().await.unwrap().document().unwrap();
        assert_eq!(global.recommendations.len(), 4);

        let subject = api.subject_insights(Some("105000005"), None).await.unwrap();
        let doc = subject[0].document().unwrap();
        assert!(doc.performance_analysis.is_some());
    }
}
