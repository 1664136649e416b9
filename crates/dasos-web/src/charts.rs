//! Shapes API rows into the series the chart widget draws.
//!
//! Views embed these as JSON in a `data-chart` attribute.

use std::collections::{BTreeMap, BTreeSet};

use dasos_common::entities::YearPairChange;
use dasos_common::{HistoricalRate, PerformanceCorrelation, RateType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatePoint {
    pub academic_year: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLine {
    pub rate_type: String,
    pub label: String,
    /// Sorted by academic year.
    pub points: Vec<RatePoint>,
    /// Aligned with [`RateSeries::labels`]; `None` where the year is missing.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateSeries {
    pub labels: Vec<String>,
    pub lines: Vec<RateLine>,
}

impl RateSeries {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Group by rate type (rendimiento, éxito, absentismo, then the rest by name)
/// and sort each group by academic year. A year repeated within a group keeps
/// its first value on the label axis.
pub fn rate_series(rows: &[HistoricalRate]) -> RateSeries {
    let mut groups: BTreeMap<(u8, String), (RateType, Vec<RatePoint>)> = BTreeMap::new();
    for row in rows {
        let key = (row.rate_type.rank(), row.rate_type.as_str().to_string());
        groups
            .entry(key)
            .or_insert_with(|| (row.rate_type.clone(), Vec::new()))
            .1
            .push(RatePoint { academic_year: row.academic_year.clone(), value: row.value });
    }

    let labels: Vec<String> = rows
        .iter()
        .map(|r| r.academic_year.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let lines = groups
        .into_values()
        .map(|(rate_type, mut points)| {
            points.sort_by(|a, b| a.academic_year.cmp(&b.academic_year));
            let values = labels
                .iter()
                .map(|year| points.iter().find(|p| &p.academic_year == year).map(|p| p.value))
                .collect();
            RateLine {
                rate_type: rate_type.as_str().to_string(),
                label: rate_type.label(),
                points,
                values,
            }
        })
        .collect();

    RateSeries { labels, lines }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRow {
    pub year1: String,
    pub year2: String,
    pub label: String,
    pub added: u32,
    pub removed: u32,
    /// Set only when a correlation has the same year pair.
    pub performance_change: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeTimeline {
    pub rows: Vec<ChangeRow>,
}

#[derive(Serialize)]
struct TimelineChart<'a> {
    labels: Vec<&'a str>,
    added: Vec<i64>,
    removed: Vec<i64>,
    performance: Vec<Option<f64>>,
}

impl ChangeTimeline {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removed counts are drawn below the axis.
    pub fn to_json(&self) -> String {
        let chart = TimelineChart {
            labels: self.rows.iter().map(|r| r.label.as_str()).collect(),
            added: self.rows.iter().map(|r| i64::from(r.added)).collect(),
            removed: self.rows.iter().map(|r| -i64::from(r.removed)).collect(),
            performance: self.rows.iter().map(|r| r.performance_change).collect(),
        };
        serde_json::to_string(&chart).unwrap_or_else(|_| "{}".to_string())
    }
}

pub fn change_timeline<C: YearPairChange>(
    changes: &[C],
    correlations: &[PerformanceCorrelation],
) -> ChangeTimeline {
    let mut rows: Vec<ChangeRow> = changes
        .iter()
        .map(|c| ChangeRow {
            year1: c.year1().to_string(),
            year2: c.year2().to_string(),
            label: format!("{} → {}", c.year1(), c.year2()),
            added: c.added(),
            removed: c.removed(),
            performance_change: correlations
                .iter()
                .find(|k| k.year1 == c.year1() && k.year2 == c.year2())
                .map(|k| k.performance_change),
        })
        .collect();

    rows.sort_by(|a, b| (&a.year1, &a.year2).cmp(&(&b.year1, &b.year2)));
    ChangeTimeline { rows }
}
