//! University catalog document (`{year}/{semester}/{plan}_{code}.json`).
//! Field names are fixed by the catalog host and kept verbatim.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The host sends `null` for some empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpmSubject {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub ects: String,
    #[serde(default)]
    pub anio: String,
    #[serde(default)]
    pub semestre: String,
    #[serde(default)]
    pub guia: Option<String>,
    #[serde(default)]
    pub depto: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub caracter: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub profesores: Vec<UpmProfessor>,
    #[serde(default)]
    pub recursos_didacticos: Option<UpmResources>,
    #[serde(default)]
    pub actividades_evaluacion: Option<UpmEvaluationActivities>,
    #[serde(default)]
    pub criterios_evaluacion: Option<String>,
    #[serde(default)]
    pub fecha_actualizacion: Option<String>,
}

impl UpmSubject {
    /// Roster without the empty `{}` placeholders the host emits.
    pub fn listed_professors(&self) -> impl Iterator<Item = &UpmProfessor> {
        self.profesores.iter().filter(|p| !p.is_empty())
    }

    pub fn coordinator(&self) -> Option<&UpmProfessor> {
        self.listed_professors().find(|p| p.coordinador == Some(true))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpmProfessor {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub despacho: Option<String>,
    #[serde(default)]
    pub coordinador: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tutorias: Vec<UpmTutoria>,
}

impl UpmProfessor {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.apellidos.is_none() && self.email.is_none()
    }

    pub fn full_name(&self) -> String {
        [self.nombre.as_deref(), self.apellidos.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpmTutoria {
    pub dia: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
    pub observaciones: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpmResources {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bibliografia: Vec<String>,
    #[serde(default, rename = "Recursos web", deserialize_with = "null_as_empty")]
    pub recursos_web: Vec<String>,
}

/// Activities keyed by the catalog's activity id.
pub type ActivityMap = BTreeMap<String, UpmEvaluationActivity>;

/// Numeric ids in numeric order, then any other ids in string order.
pub fn activities_in_id_order(map: &ActivityMap) -> Vec<(&str, &UpmEvaluationActivity)> {
    let mut entries: Vec<(&str, &UpmEvaluationActivity)> =
        map.iter().map(|(id, a)| (id.as_str(), a)).collect();
    entries.sort_by(|(a, _), (b, _)| compare_ids(a, b));
    entries
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpmEvaluationActivities {
    #[serde(default)]
    pub evaluacion_continua: Option<ActivityMap>,
    #[serde(default)]
    pub evaluacion_extraordinaria: Option<ActivityMap>,
    #[serde(default)]
    pub prueba_final: Option<ActivityMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpmEvaluationActivity {
    #[serde(rename = "SEMANA")]
    pub semana: String,
    #[serde(rename = "DENOMINACION")]
    pub denominacion: String,
    #[serde(rename = "DURACION")]
    pub duracion: String,
    #[serde(rename = "TECNICA")]
    pub tecnica: String,
    #[serde(rename = "PESO")]
    pub peso: String,
    #[serde(rename = "NOTA_MINIMA")]
    pub nota_minima: String,
    #[serde(rename = "PRESENCIAL")]
    pub presencial: String,
}
