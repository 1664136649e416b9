//! Decoder for the `insights_json` blobs produced by the external analytics job.
//!
//! The producer has changed shape several times. Known layouts:
//!   - impacts as plain strings, top-level `recommendations: [String]`
//!   - impacts as `{insight, recommendations}` objects (global analysis)
//!   - a `periods` list whose last entry carries `insights: [{text, type}]`
//!   - top-level `recommendations` grouped as `{faculty, evaluation, general}`
//!
//! Recommendations are taken from the first layout that yields any, in the
//! order: periods, top-level list or groups, impact objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::entities::{GlobalInsights, SubjectInsights};

/// `faculty_impact` / `evaluation_impact` as delivered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImpactNote {
    Text(String),
    Detailed {
        #[serde(default)]
        insight: Option<String>,
        #[serde(default)]
        recommendations: Vec<String>,
    },
}

impl ImpactNote {
    pub fn text(&self) -> Option<&str> {
        match self {
            ImpactNote::Text(t) => Some(t.as_str()),
            ImpactNote::Detailed { insight, .. } => insight.as_deref(),
        }
    }

    fn recommendations(&self) -> &[String] {
        match self {
            ImpactNote::Text(_) => &[],
            ImpactNote::Detailed { recommendations, .. } => recommendations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Faculty,
    Evaluation,
    General,
}

impl RecommendationKind {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("faculty") => RecommendationKind::Faculty,
            Some("evaluation") => RecommendationKind::Evaluation,
            _ => RecommendationKind::General,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub text: String,
}

/// Where the recommendations list was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    LatestPeriod,
    TopLevel,
    ImpactNotes,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRecommendation {
    Text(String),
    Tagged {
        text: String,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
}

impl From<RawRecommendation> for Recommendation {
    fn from(raw: RawRecommendation) -> Self {
        match raw {
            RawRecommendation::Text(text) => Recommendation { kind: RecommendationKind::General, text },
            RawRecommendation::Tagged { text, kind } => Recommendation {
                kind: RecommendationKind::parse(kind.as_deref()),
                text,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightDocument {
    pub performance_analysis: Option<String>,
    pub faculty_impact: Option<String>,
    pub evaluation_impact: Option<String>,
    pub recommendations: Vec<Recommendation>,
    pub recommendation_source: Option<RecommendationSource>,
}

impl InsightDocument {
    pub fn is_empty(&self) -> bool {
        self.performance_analysis.is_none()
            && self.faculty_impact.is_none()
            && self.evaluation_impact.is_none()
            && self.recommendations.is_empty()
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let faculty = obj.get("faculty_impact").and_then(impact_note);
        let evaluation = obj.get("evaluation_impact").and_then(impact_note);

        let mut doc = InsightDocument {
            performance_analysis: obj
                .get("performance_analysis")
                .and_then(Value::as_str)
                .map(String::from),
            faculty_impact: faculty.as_ref().and_then(|n| n.text()).map(String::from),
            evaluation_impact: evaluation.as_ref().and_then(|n| n.text()).map(String::from),
            ..Default::default()
        };

        let latest_period = obj
            .get("periods")
            .and_then(Value::as_array)
            .and_then(|periods| periods.last())
            .and_then(|period| period.get("insights"))
            .map(recommendation_list)
            .unwrap_or_default();

        if !latest_period.is_empty() {
            doc.recommendations = latest_period;
            doc.recommendation_source = Some(RecommendationSource::LatestPeriod);
            return doc;
        }

        let top_level = obj
            .get("recommendations")
            .map(recommendation_list)
            .unwrap_or_default();

        if !top_level.is_empty() {
            doc.recommendations = top_level;
            doc.recommendation_source = Some(RecommendationSource::TopLevel);
            return doc;
        }

        let from_notes: Vec<Recommendation> = [
            (faculty.as_ref(), RecommendationKind::Faculty),
            (evaluation.as_ref(), RecommendationKind::Evaluation),
        ]
        .into_iter()
        .filter_map(|(note, kind)| note.map(|n| (n, kind)))
        .flat_map(|(note, kind)| {
            note.recommendations()
                .iter()
                .map(move |text| Recommendation { kind, text: text.clone() })
        })
        .collect();

        if !from_notes.is_empty() {
            doc.recommendations = from_notes;
            doc.recommendation_source = Some(RecommendationSource::ImpactNotes);
        }
        doc
    }
}

fn impact_note(value: &Value) -> Option<ImpactNote> {
    serde_json::from_value(value.clone()).ok()
}

/// Either a list of entries or an object grouping them under `faculty`,
/// `evaluation` and `general`. Entries that match neither a bare string nor
/// `{text, type}` are skipped.
fn recommendation_list(value: &Value) -> Vec<Recommendation> {
    match value {
        Value::Array(items) => items.iter().filter_map(raw_recommendation).collect(),
        Value::Object(groups) => [
            ("faculty", RecommendationKind::Faculty),
            ("evaluation", RecommendationKind::Evaluation),
            ("general", RecommendationKind::General),
        ]
        .into_iter()
        .filter_map(|(key, kind)| groups.get(key).and_then(Value::as_array).map(|items| (items, kind)))
        .flat_map(|(items, kind)| {
            items
                .iter()
                .filter_map(raw_recommendation)
                .map(move |rec| Recommendation { kind, ..rec })
        })
        .collect(),
        _ => Vec::new(),
    }
}

fn raw_recommendation(item: &Value) -> Option<Recommendation> {
    serde_json::from_value::<RawRecommendation>(item.clone())
        .ok()
        .map(Recommendation::from)
}

/// Decode an `insights_json` string. Blank input or invalid JSON yields `None`.
pub fn decode_insights(raw: Option<&str>) -> Option<InsightDocument> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode_insights_value(&value),
        Err(e) => {
            warn!(error = %e, "Failed to parse insights_json");
            None
        }
    }
}

/// Decode an already-parsed blob. A string value is treated as nested JSON.
pub fn decode_insights_value(value: &Value) -> Option<InsightDocument> {
    match value {
        Value::String(s) => decode_insights(Some(s)),
        Value::Object(obj) => Some(InsightDocument::from_object(obj)),
        _ => None,
    }
}

fn document_of(data: Option<&Value>, json: Option<&Value>) -> Option<InsightDocument> {
    data.and_then(decode_insights_value)
        .or_else(|| json.and_then(decode_insights_value))
}

impl SubjectInsights {
    /// Pre-parsed `insights_data` wins over the raw `insights_json`.
    pub fn document(&self) -> Option<InsightDocument> {
        document_of(self.insights_data.as_ref(), self.insights_json.as_ref())
    }
}

impl GlobalInsights {
    pub fn document(&self) -> Option<InsightDocument> {
        document_of(self.insights_data.as_ref(), self.insights_json.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Presentation labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Positive => "tone-positive",
            Tone::Negative => "tone-negative",
            Tone::Neutral => "tone-neutral",
        }
    }
}

pub fn trend_tone(trend: &str) -> Tone {
    match trend.trim().to_lowercase().as_str() {
        "improving" | "positive" => Tone::Positive,
        "declining" | "negative" => Tone::Negative,
        _ => Tone::Neutral,
    }
}

pub fn trend_label(trend: &str) -> &'static str {
    match trend.trim().to_lowercase().as_str() {
        "improving" => "Mejorando",
        "declining" => "Empeorando",
        _ => "Estable",
    }
}

pub fn impact_tone(impact: &str) -> Tone {
    match impact.trim().to_lowercase().as_str() {
        "positive" => Tone::Positive,
        "negative" => Tone::Negative,
        _ => Tone::Neutral,
    }
}

pub fn impact_label(impact: &str) -> &'static str {
    match impact_tone(impact) {
        Tone::Positive => "Positivo",
        Tone::Negative => "Negativo",
        Tone::Neutral => "Neutro",
    }
}
