//! Template environment. Templates are compiled into the binary.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::WebError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("nav.html", include_str!("../templates/nav.html")),
    ("macros.html", include_str!("../templates/macros.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
    ("subjects.html", include_str!("../templates/subjects.html")),
    ("subject_detail.html", include_str!("../templates/subject_detail.html")),
    ("subject_info.html", include_str!("../templates/subject_info.html")),
    ("profile.html", include_str!("../templates/profile.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, WebError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, WebError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}
