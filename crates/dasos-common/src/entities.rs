/// Entity types returned by the academic analytics API.
/// Nothing here is computed locally; these mirror the remote JSON shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub subject_code: String,
    pub subject_name: String,
    #[serde(default)]
    pub credits: f64,
    pub academic_year: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub total_enrolled: Option<u32>,
    #[serde(default)]
    pub first_time: Option<u32>,
    #[serde(default)]
    pub partial_dedication: Option<u32>,
    #[serde(default)]
    pub performance_rate: Option<f64>,   // aprobados / matriculados
    #[serde(default)]
    pub success_rate: Option<f64>,       // aprobados / presentados
    #[serde(default)]
    pub absenteeism_rate: Option<f64>,   // no presentados / matriculados
}

impl Subject {
    /// Whether any of the three rate metrics is present.
    pub fn has_metrics(&self) -> bool {
        self.performance_rate.is_some()
            || self.success_rate.is_some()
            || self.absenteeism_rate.is_some()
    }
}

/// Optional filters for the subject listing. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectFilter {
    pub academic_year: Option<String>,
    pub semester: Option<String>,
}

impl SubjectFilter {
    pub fn for_year(year: impl Into<String>) -> Self {
        Self { academic_year: Some(year.into()), semester: None }
    }

    pub fn with_semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = Some(semester.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        blank(&self.academic_year) && blank(&self.semester)
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Search result shape consumed by the search box: `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectHit {
    pub id: String,
    pub name: String,
}

impl From<&Subject> for SubjectHit {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.subject_code.clone(),
            name: subject.subject_name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Historical rates
// ---------------------------------------------------------------------------

/// One of the three cohort metrics. Unknown labels survive as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RateType {
    Rendimiento,
    Exito,
    Absentismo,
    Other(String),
}

impl RateType {
    pub fn as_str(&self) -> &str {
        match self {
            RateType::Rendimiento => "rendimiento",
            RateType::Exito => "éxito",
            RateType::Absentismo => "absentismo",
            RateType::Other(s) => s,
        }
    }

    /// Human label used in chart legends.
    pub fn label(&self) -> String {
        match self {
            RateType::Rendimiento => "Tasa de rendimiento".to_string(),
            RateType::Exito => "Tasa de éxito".to_string(),
            RateType::Absentismo => "Tasa de absentismo".to_string(),
            RateType::Other(s) => s.clone(),
        }
    }

    /// Display rank: the three known metrics first, in a fixed order.
    pub fn rank(&self) -> u8 {
        match self {
            RateType::Rendimiento => 0,
            RateType::Exito => 1,
            RateType::Absentismo => 2,
            RateType::Other(_) => 3,
        }
    }
}

impl From<String> for RateType {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "rendimiento" => RateType::Rendimiento,
            "éxito" | "exito" => RateType::Exito,
            "absentismo" => RateType::Absentismo,
            _ => RateType::Other(raw),
        }
    }
}

impl From<RateType> for String {
    fn from(rate: RateType) -> Self {
        rate.as_str().to_string()
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRate {
    pub subject_code: String,
    pub academic_year: String,
    pub rate_type: RateType,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Year-over-year changes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyChange {
    pub subject_code: String,
    #[serde(default)]
    pub subject_name: String,
    pub year1: String,
    pub year2: String,
    #[serde(default)]
    pub faculty_added: u32,
    #[serde(default)]
    pub faculty_removed: u32,
    #[serde(default)]
    pub percent_changed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationChange {
    pub subject_code: String,
    #[serde(default)]
    pub subject_name: String,
    pub year1: String,
    pub year2: String,
    #[serde(default)]
    pub methods_added: u32,
    #[serde(default)]
    pub methods_removed: u32,
}

/// Common view over faculty and evaluation diffs, keyed by year pair.
pub trait YearPairChange {
    fn year1(&self) -> &str;
    fn year2(&self) -> &str;
    fn added(&self) -> u32;
    fn removed(&self) -> u32;
}

impl YearPairChange for FacultyChange {
    fn year1(&self) -> &str { &self.year1 }
    fn year2(&self) -> &str { &self.year2 }
    fn added(&self) -> u32 { self.faculty_added }
    fn removed(&self) -> u32 { self.faculty_removed }
}

impl YearPairChange for EvaluationChange {
    fn year1(&self) -> &str { &self.year1 }
    fn year2(&self) -> &str { &self.year2 }
    fn added(&self) -> u32 { self.methods_added }
    fn removed(&self) -> u32 { self.methods_removed }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceCorrelation {
    pub subject_code: String,
    #[serde(default)]
    pub subject_name: String,
    pub year1: String,
    pub year2: String,
    pub performance_change: f64,
    #[serde(default)]
    pub faculty_changed: bool,
    #[serde(default)]
    pub faculty_percent_changed: f64,
    #[serde(default)]
    pub faculty_added: u32,
    #[serde(default)]
    pub faculty_removed: u32,
    #[serde(default)]
    pub evaluation_changed: bool,
    #[serde(default)]
    pub evaluation_methods_added: u32,
    #[serde(default)]
    pub evaluation_methods_removed: u32,
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// Analysis-wide insights. `insights_json` is usually a JSON string, but some
/// producers inline the object; both are kept as raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalInsights {
    pub analysis_id: i64,
    #[serde(default)]
    pub analysis_date: String,
    #[serde(default)]
    pub faculty_impact_type: String,
    #[serde(default)]
    pub faculty_change_performance: f64,
    #[serde(default)]
    pub faculty_stable_performance: f64,
    #[serde(default)]
    pub evaluation_impact_type: String,
    #[serde(default)]
    pub evaluation_change_performance: f64,
    #[serde(default)]
    pub evaluation_stable_performance: f64,
    #[serde(default)]
    pub insights_json: Option<serde_json::Value>,
    #[serde(default)]
    pub insights_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInsights {
    pub subject_code: String,
    #[serde(default)]
    pub analysis_id: i64,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub avg_performance_change: f64,
    #[serde(default)]
    pub trend_direction: String,
    #[serde(default)]
    pub faculty_impact_type: String,
    #[serde(default)]
    pub evaluation_impact_type: String,
    #[serde(default)]
    pub insights_json: Option<serde_json::Value>,
    #[serde(default)]
    pub insights_data: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStats {
    #[serde(default)]
    pub total_subjects: u64,
    #[serde(default)]
    pub total_academic_years: u64,
    #[serde(default)]
    pub academic_years: Vec<String>,
    #[serde(default)]
    pub total_historical_rates: u64,
    #[serde(default)]
    pub has_api_analysis: bool,
}

impl ApiStats {
    /// Last entry of `academic_years`. The list is taken to be ascending
    /// as delivered; it is not re-sorted here.
    pub fn latest_year(&self) -> Option<&str> {
        self.academic_years.last().map(String::as_str)
    }
}
