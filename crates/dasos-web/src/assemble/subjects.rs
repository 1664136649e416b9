use std::cmp::Ordering;

use dasos_api::AcademicApi;
use dasos_common::{Subject, SubjectFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectSort {
    #[default]
    Name,
    PerformanceHigh,
    PerformanceLow,
    Enrolled,
}

impl SubjectSort {
    pub const ALL: [SubjectSort; 4] = [
        SubjectSort::Name,
        SubjectSort::PerformanceHigh,
        SubjectSort::PerformanceLow,
        SubjectSort::Enrolled,
    ];

    /// Unknown or missing keys sort by name.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("performance_high") => SubjectSort::PerformanceHigh,
            Some("performance_low") => SubjectSort::PerformanceLow,
            Some("enrolled") => SubjectSort::Enrolled,
            _ => SubjectSort::Name,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SubjectSort::Name => "name",
            SubjectSort::PerformanceHigh => "performance_high",
            SubjectSort::PerformanceLow => "performance_low",
            SubjectSort::Enrolled => "enrolled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubjectSort::Name => "Nombre",
            SubjectSort::PerformanceHigh => "Rendimiento (mayor primero)",
            SubjectSort::PerformanceLow => "Rendimiento (menor primero)",
            SubjectSort::Enrolled => "Matriculados (mayor primero)",
        }
    }

    pub fn apply(self, subjects: &mut [Subject]) {
        match self {
            SubjectSort::Name => subjects.sort_by_cached_key(|s| name_key(&s.subject_name)),
            SubjectSort::PerformanceHigh => subjects.sort_by(|a, b| {
                missing_last(a.performance_rate, b.performance_rate, |x, y| y.total_cmp(&x))
            }),
            SubjectSort::PerformanceLow => subjects.sort_by(|a, b| {
                missing_last(a.performance_rate, b.performance_rate, |x, y| x.total_cmp(&y))
            }),
            SubjectSort::Enrolled => subjects.sort_by(|a, b| {
                missing_last(a.total_enrolled, b.total_enrolled, |x, y| y.cmp(&x))
            }),
        }
    }
}

/// Case- and accent-insensitive: `Álgebra` collates as `algebra`.
fn name_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectListView {
    pub filter: SubjectFilter,
    pub sort: SubjectSort,
    /// Choices for the year selector, from `/stats`.
    pub academic_years: Vec<String>,
    pub subjects: Vec<Subject>,
}

pub async fn assemble_subject_list(
    api: &dyn AcademicApi,
    filter: SubjectFilter,
    sort: SubjectSort,
) -> SubjectListView {
    let (subjects, stats) = tokio::join!(api.list_subjects(&filter), api.stats());

    let mut subjects = subjects.unwrap_or_else(|e| {
        warn!(error = %e, "Subject list unavailable");
        Vec::new()
    });
    sort.apply(&mut subjects);

    let academic_years = match stats {
        Ok(stats) => stats.academic_years.into_iter().rev().collect(),
        Err(e) => {
            warn!(error = %e, "Year choices unavailable");
            Vec::new()
        }
    };

    debug!(count = subjects.len(), sort = sort.key(), "Subject list assembled");
    SubjectListView { filter, sort, academic_years, subjects }
}
