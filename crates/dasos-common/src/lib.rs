//! dasos-common: Shared types, errors, and helpers used across all DASOS crates.

pub mod error;
pub mod entities;
pub mod academic;
pub mod insights;
pub mod catalog;

// Re-export commonly used types
pub use entities::{
    ApiStats, EvaluationChange, FacultyChange, GlobalInsights, HistoricalRate,
    PerformanceCorrelation, RateType, Subject, SubjectFilter, SubjectHit, SubjectInsights,
};
pub use error::{DasosError, Result};
