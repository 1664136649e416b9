//! Academic calendar normalization for the university catalog key scheme.
//!
//! The catalog addresses a subject by `{year}/{semester}/{plan}_{code}.json`,
//! where the year is written `YYYY-YY` and the semester as `1S` / `2S`.

/// Default degree plan (Grado en Ingeniería Informática).
pub const DEFAULT_PLAN_CODE: &str = "10II";

/// `2023/24` → `2023-24`. Hyphenated input passes through unchanged.
pub fn normalize_academic_year(year: &str) -> String {
    year.trim().replace('/', "-")
}

/// Semester code from the free-text semester field: `Segundo` → `2S`,
/// anything else → `1S`.
pub fn semester_code(semester: &str) -> &'static str {
    if semester.trim().to_lowercase() == "segundo" {
        "2S"
    } else {
        "1S"
    }
}

/// Relative path of a subject document on the catalog host.
pub fn catalog_path(code: &str, year: &str, semester_code: &str, plan_code: &str) -> String {
    format!(
        "{}/{}/{}_{}.json",
        normalize_academic_year(year),
        semester_code,
        plan_code,
        code.trim()
    )
}
