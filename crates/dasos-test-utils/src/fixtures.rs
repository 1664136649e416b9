//! Fixture builders for API payloads.

use dasos_common::{
    ApiStats, EvaluationChange, FacultyChange, HistoricalRate, PerformanceCorrelation, RateType,
    Subject, SubjectInsights,
};
use serde_json::Value;

pub fn subject(code: &str, name: &str, academic_year: &str) -> Subject {
    Subject {
        subject_code: code.to_string(),
        subject_name: name.to_string(),
        credits: 6.0,
        academic_year: academic_year.to_string(),
        semester: "Primero".to_string(),
        total_enrolled: None,
        first_time: None,
        partial_dedication: None,
        performance_rate: None,
        success_rate: None,
        absenteeism_rate: None,
    }
}

pub fn subject_with_rates(code: &str, name: &str, performance: Option<f64>, enrolled: Option<u32>) -> Subject {
    Subject {
        performance_rate: performance,
        total_enrolled: enrolled,
        ..subject(code, name, "2023-24")
    }
}

/// `count` subjects numbered from 105000001 in the given year.
pub fn subjects_in_year(academic_year: &str, count: usize) -> Vec<Subject> {
    (1..=count)
        .map(|i| subject(&format!("1050000{:02}", i), &format!("Asignatura {}", i), academic_year))
        .collect()
}

pub fn rate(code: &str, academic_year: &str, rate_type: &str, value: f64) -> HistoricalRate {
    HistoricalRate {
        subject_code: code.to_string(),
        academic_year: academic_year.to_string(),
        rate_type: RateType::from(rate_type.to_string()),
        value,
    }
}

pub fn faculty_change(code: &str, year1: &str, year2: &str, added: u32, removed: u32) -> FacultyChange {
    FacultyChange {
        subject_code: code.to_string(),
        subject_name: String::new(),
        year1: year1.to_string(),
        year2: year2.to_string(),
        faculty_added: added,
        faculty_removed: removed,
        percent_changed: 0.0,
    }
}

pub fn evaluation_change(code: &str, year1: &str, year2: &str, added: u32, removed: u32) -> EvaluationChange {
    EvaluationChange {
        subject_code: code.to_string(),
        subject_name: String::new(),
        year1: year1.to_string(),
        year2: year2.to_string(),
        methods_added: added,
        methods_removed: removed,
    }
}

pub fn correlation(code: &str, year1: &str, year2: &str, performance_change: f64) -> PerformanceCorrelation {
    PerformanceCorrelation {
        subject_code: code.to_string(),
        subject_name: String::new(),
        year1: year1.to_string(),
        year2: year2.to_string(),
        performance_change,
        faculty_changed: false,
        faculty_percent_changed: 0.0,
        faculty_added: 0,
        faculty_removed: 0,
        evaluation_changed: false,
        evaluation_methods_added: 0,
        evaluation_methods_removed: 0,
    }
}

/// Subject insights whose `insights_json` is the serialized `document`.
pub fn subject_insights(code: &str, document: Value) -> SubjectInsights {
    SubjectInsights {
        subject_code: code.to_string(),
        analysis_id: 1,
        subject_name: String::new(),
        avg_performance_change: 0.0,
        trend_direction: "stable".to_string(),
        faculty_impact_type: "neutral".to_string(),
        evaluation_impact_type: "neutral".to_string(),
        insights_json: Some(Value::String(document.to_string())),
        insights_data: None,
    }
}

pub fn stats(academic_years: &[&str]) -> ApiStats {
    ApiStats {
        total_subjects: 0,
        total_academic_years: academic_years.len() as u64,
        academic_years: academic_years.iter().map(|y| y.to_string()).collect(),
        total_historical_rates: 0,
        has_api_analysis: true,
    }
}
