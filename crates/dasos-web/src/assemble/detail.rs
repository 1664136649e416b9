use dasos_api::AcademicApi;
use dasos_common::insights::{impact_label, impact_tone, trend_label, trend_tone, InsightDocument};
use dasos_common::{DasosError, PerformanceCorrelation, Subject, SubjectInsights};
use serde::Serialize;
use tracing::{debug, warn};

use super::{PageOutcome, Section};
use crate::charts::{change_timeline, rate_series, ChangeTimeline, RateSeries};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightPanel {
    pub trend_label: &'static str,
    pub trend_class: &'static str,
    pub avg_performance_change: f64,
    pub faculty_impact_label: &'static str,
    pub faculty_impact_class: &'static str,
    pub evaluation_impact_label: &'static str,
    pub evaluation_impact_class: &'static str,
    pub document: Option<InsightDocument>,
}

impl From<&SubjectInsights> for InsightPanel {
    fn from(record: &SubjectInsights) -> Self {
        Self {
            trend_label: trend_label(&record.trend_direction),
            trend_class: trend_tone(&record.trend_direction).css_class(),
            avg_performance_change: record.avg_performance_change,
            faculty_impact_label: impact_label(&record.faculty_impact_type),
            faculty_impact_class: impact_tone(&record.faculty_impact_type).css_class(),
            evaluation_impact_label: impact_label(&record.evaluation_impact_type),
            evaluation_impact_class: impact_tone(&record.evaluation_impact_type).css_class(),
            document: record.document().filter(|doc| !doc.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectDetailView {
    pub subject: Subject,
    pub historical: Section<RateSeries>,
    pub faculty: Section<ChangeTimeline>,
    pub evaluation: Section<ChangeTimeline>,
    /// `Ready(None)` when the subject simply has no analysis.
    pub insights: Section<Option<InsightPanel>>,
}

fn section<T, U>(name: &str, result: Result<T, DasosError>, shape: impl FnOnce(T) -> U) -> Section<U> {
    match result {
        Ok(rows) => Section::Ready(shape(rows)),
        Err(e) => {
            warn!(section = name, error = %e, "Section unavailable");
            Section::Unavailable
        }
    }
}

pub async fn assemble_subject_detail(api: &dyn AcademicApi, code: &str) -> PageOutcome<SubjectDetailView> {
    let subject = match api.get_subject(code, None).await {
        Ok(Some(subject)) => subject,
        Ok(None) => {
            debug!(code, "Subject not found");
            return PageOutcome::NotFound;
        }
        Err(e) => {
            warn!(code, error = %e, "Subject lookup failed");
            return PageOutcome::NotFound;
        }
    };

    let (historical, faculty, evaluation, correlations, insights) = tokio::join!(
        api.historical_rates(code, None),
        api.faculty_changes(Some(code)),
        api.evaluation_changes(Some(code)),
        api.correlations(Some(code)),
        api.subject_insights(Some(code), None),
    );

    // Change rows still render without deltas.
    let correlations: Vec<PerformanceCorrelation> = correlations.unwrap_or_else(|e| {
        warn!(code, error = %e, "Correlations unavailable");
        Vec::new()
    });

    let view = SubjectDetailView {
        subject,
        historical: section("historical", historical, |rows| rate_series(&rows)),
        faculty: section("faculty", faculty, |rows| change_timeline(&rows, &correlations)),
        evaluation: section("evaluation", evaluation, |rows| change_timeline(&rows, &correlations)),
        insights: section("insights", insights, |rows| rows.first().map(InsightPanel::from)),
    };

    PageOutcome::Found(view)
}
