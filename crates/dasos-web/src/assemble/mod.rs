//! Page data assemblers.
//!
//! Each assembler fetches its primary entity first, then fans the independent
//! queries out concurrently. A failed secondary query only empties its own
//! section; a page never fails as a whole for a secondary failure.

pub mod dashboard;
pub mod detail;
pub mod info;
pub mod subjects;

use serde::{Serialize, Serializer};

pub use dashboard::{assemble_dashboard, DashboardView};
pub use detail::{assemble_subject_detail, SubjectDetailView};
pub use info::{assemble_subject_info, SubjectInfoView};
pub use subjects::{assemble_subject_list, SubjectListView, SubjectSort};

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Found(T),
    NotFound,
}

impl<T> PageOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            PageOutcome::Found(view) => Some(view),
            PageOutcome::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PageOutcome::NotFound)
    }
}

/// One independently fetched part of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    Unavailable,
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(data) => Some(data),
            Section::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Section::Unavailable)
    }
}

/// Templates see `Unavailable` as `none`.
impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ready().serialize(serializer)
    }
}
