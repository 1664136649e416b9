use dasos_api::{AcademicApi, CatalogOutcome, CatalogRequest, CatalogSource};
use dasos_common::catalog::{activities_in_id_order, ActivityMap, UpmProfessor, UpmSubject};
use dasos_common::Subject;
use serde::Serialize;
use tracing::{debug, warn};

use super::PageOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    Live,
    Sample,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessorRow {
    pub name: String,
    pub email: Option<String>,
    pub office: Option<String>,
    pub coordinator: bool,
    pub tutoring: Vec<String>,
}

impl From<&UpmProfessor> for ProfessorRow {
    fn from(p: &UpmProfessor) -> Self {
        let tutoring = p
            .tutorias
            .iter()
            .filter_map(|t| {
                let slot = match (&t.dia, &t.hora_inicio, &t.hora_fin) {
                    (Some(day), Some(from), Some(to)) => Some(format!("{} {}-{}", day, from, to)),
                    _ => None,
                };
                match (slot, t.observaciones.as_deref().filter(|o| !o.is_empty())) {
                    (Some(slot), Some(note)) => Some(format!("{} ({})", slot, note)),
                    (Some(slot), None) => Some(slot),
                    (None, note) => note.map(str::to_string),
                }
            })
            .collect();

        Self {
            name: p.full_name(),
            email: p.email.clone(),
            office: p.despacho.clone(),
            coordinator: p.coordinador == Some(true),
            tutoring,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRow {
    pub id: String,
    pub week: String,
    pub name: String,
    pub duration: String,
    pub technique: String,
    pub weight: String,
    pub min_grade: String,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySection {
    pub title: &'static str,
    pub activities: Vec<ActivityRow>,
}

fn activity_rows(map: &ActivityMap) -> Vec<ActivityRow> {
    activities_in_id_order(map)
        .into_iter()
        .map(|(id, a)| ActivityRow {
            id: id.to_string(),
            week: a.semana.clone(),
            name: a.denominacion.clone(),
            duration: a.duracion.clone(),
            technique: a.tecnica.clone(),
            weight: a.peso.clone(),
            min_grade: a.nota_minima.clone(),
            mode: a.presencial.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPanel {
    pub department: String,
    pub plan: String,
    pub character: String,
    pub ects: String,
    pub guide_url: Option<String>,
    pub updated_at: Option<String>,
    pub professors: Vec<ProfessorRow>,
    pub bibliography: Vec<String>,
    pub web_resources: Vec<String>,
    pub activities: Vec<ActivitySection>,
    /// Trusted HTML from the catalog host.
    pub criteria_html: Option<String>,
}

impl From<&UpmSubject> for CatalogPanel {
    fn from(doc: &UpmSubject) -> Self {
        let resources = doc.recursos_didacticos.clone().unwrap_or_default();
        let activities = doc
            .actividades_evaluacion
            .as_ref()
            .map(|a| {
                [
                    ("Evaluación continua", &a.evaluacion_continua),
                    ("Prueba final", &a.prueba_final),
                    ("Evaluación extraordinaria", &a.evaluacion_extraordinaria),
                ]
                .into_iter()
                .filter_map(|(title, map)| {
                    map.as_ref().map(|m| ActivitySection { title, activities: activity_rows(m) })
                })
                .filter(|s| !s.activities.is_empty())
                .collect()
            })
            .unwrap_or_default();

        Self {
            department: doc.depto.clone(),
            plan: doc.plan.clone(),
            character: doc.caracter.clone(),
            ects: doc.ects.clone(),
            guide_url: doc.guia.clone().filter(|g| !g.is_empty()),
            updated_at: doc.fecha_actualizacion.clone(),
            professors: doc.listed_professors().map(ProfessorRow::from).collect(),
            bibliography: resources.bibliografia,
            web_resources: resources.recursos_web,
            activities,
            criteria_html: doc.criterios_evaluacion.clone().filter(|c| !c.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectInfoView {
    pub subject: Subject,
    pub catalog_status: CatalogStatus,
    pub catalog: Option<CatalogPanel>,
}

/// The catalog never blocks the page; only the subject lookup can 404 it.
pub async fn assemble_subject_info(
    api: &dyn AcademicApi,
    catalog: &dyn CatalogSource,
    code: &str,
    plan_code: &str,
) -> PageOutcome<SubjectInfoView> {
    let subject = match api.get_subject(code, None).await {
        Ok(Some(subject)) => subject,
        Ok(None) => return PageOutcome::NotFound,
        Err(e) => {
            warn!(code, error = %e, "Subject lookup failed");
            return PageOutcome::NotFound;
        }
    };

    let request = CatalogRequest::for_subject(&subject, plan_code);
    let outcome = catalog.subject_detail(&request).await;

    let catalog_status = match &outcome {
        CatalogOutcome::Live(_) => CatalogStatus::Live,
        CatalogOutcome::Fallback(_) => CatalogStatus::Sample,
        CatalogOutcome::NotAvailable => CatalogStatus::Unavailable,
    };
    debug!(code, path = %request.path(), status = ?catalog_status, "Subject info assembled");

    PageOutcome::Found(SubjectInfoView {
        catalog: outcome.document().map(CatalogPanel::from),
        subject,
        catalog_status,
    })
}
