//! Subject listing with year/semester filters and sorting.

use axum::extract::{Query, State};
use axum::response::Html;
use dasos_common::SubjectFilter;
use minijinja::context;
use serde::{Deserialize, Serialize};

use crate::assemble::{assemble_subject_list, SubjectSort};
use crate::error::WebError;
use crate::session::Session;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct SubjectListQuery {
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub sort: Option<String>,
}

impl SubjectListQuery {
    pub fn filter(&self) -> SubjectFilter {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(String::from);
        SubjectFilter {
            academic_year: present(&self.academic_year),
            semester: present(&self.semester),
        }
    }
}

#[derive(Serialize)]
struct SortOption {
    key: &'static str,
    label: &'static str,
}

/// GET /dashboard/subjectdata
pub async fn subject_list(
    State(state): State<SharedState>,
    session: Session,
    Query(query): Query<SubjectListQuery>,
) -> Result<Html<String>, WebError> {
    let sort = SubjectSort::parse(query.sort.as_deref());
    let view = assemble_subject_list(state.api.as_ref(), query.filter(), sort).await;

    let sort_options: Vec<SortOption> = SubjectSort::ALL
        .iter()
        .map(|s| SortOption { key: s.key(), label: s.label() })
        .collect();

    state.views.render(
        "subjects.html",
        context! {
            session => session,
            active => "subjects",
            debounce_ms => state.config.search.debounce_ms,
            sort_key => sort.key(),
            sort_options => sort_options,
            view => view,
        },
    )
}
