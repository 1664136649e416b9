//! University catalog client (comun_gauss public API).
//!
//! The catalog host is outside our control and has no SLA, so this client
//! never returns an error. Every call resolves to a [`CatalogOutcome`] that
//! says whether the document is live, the bundled sample, or missing.

use std::time::Duration;

use async_trait::async_trait;
use dasos_common::academic::{catalog_path, normalize_academic_year, semester_code};
use dasos_common::catalog::UpmSubject;
use dasos_common::{DasosError, Result, Subject};
use dasos_config::Config;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument, warn};

const SAMPLE_DOCUMENT: &str = include_str!("../fixtures/upm_sample.json");

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome {
    /// The catalog host answered with a valid document.
    Live(UpmSubject),
    /// The host failed; this is the bundled sample document.
    Fallback(UpmSubject),
    /// The host failed and no fallback is configured.
    NotAvailable,
}

impl CatalogOutcome {
    pub fn document(&self) -> Option<&UpmSubject> {
        match self {
            CatalogOutcome::Live(doc) | CatalogOutcome::Fallback(doc) => Some(doc),
            CatalogOutcome::NotAvailable => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, CatalogOutcome::Live(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CatalogOutcome::Fallback(_))
    }
}

/// Positional key of a catalog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub code: String,
    pub academic_year: String,
    pub semester_code: String,
    pub plan_code: String,
}

impl CatalogRequest {
    pub fn new(code: &str, academic_year: &str, semester_code: &str, plan_code: &str) -> Self {
        Self {
            code: code.trim().to_string(),
            academic_year: normalize_academic_year(academic_year),
            semester_code: semester_code.trim().to_string(),
            plan_code: plan_code.trim().to_string(),
        }
    }

    /// Key for a subject record: `2023/24` + `Segundo` → `2023-24` / `2S`.
    pub fn for_subject(subject: &Subject, plan_code: &str) -> Self {
        Self::new(
            &subject.subject_code,
            &subject.academic_year,
            semester_code(&subject.semester),
            plan_code,
        )
    }

    pub fn path(&self) -> String {
        catalog_path(&self.code, &self.academic_year, &self.semester_code, &self.plan_code)
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn subject_detail(&self, request: &CatalogRequest) -> CatalogOutcome;
}

/// Parse the bundled sample document.
pub fn sample_document() -> Result<UpmSubject> {
    Ok(serde_json::from_str(SAMPLE_DOCUMENT)?)
}

#[derive(Debug, Clone)]
pub struct UpmCatalogClient {
    client: Client,
    base_url: String,
    fallback: Option<UpmSubject>,
    /// Skip the network entirely and serve the sample.
    offline: bool,
}

impl UpmCatalogClient {
    pub fn new(base_url: &str, timeout_secs: u64, fallback: Option<UpmSubject>) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(DasosError::from)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback,
            offline: false,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let fallback = if config.catalog.fallback_to_sample || config.api.use_mock_data {
            Some(sample_document()?)
        } else {
            None
        };
        let mut client = Self::new(&config.catalog.base_url, config.catalog.timeout_secs, fallback)?;
        client.offline = config.api.use_mock_data;
        Ok(client)
    }

    pub fn url_for(&self, request: &CatalogRequest) -> String {
        format!("{}/{}", self.base_url, request.path())
    }

    async fn fetch(&self, url: &str) -> Result<UpmSubject> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DasosError::Status { status: status.as_u16(), url: url.to_string() });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn degrade(&self) -> CatalogOutcome {
        match &self.fallback {
            Some(sample) => CatalogOutcome::Fallback(sample.clone()),
            None => CatalogOutcome::NotAvailable,
        }
    }
}

#[async_trait]
impl CatalogSource for UpmCatalogClient {
    #[instrument(skip(self))]
    async fn subject_detail(&self, request: &CatalogRequest) -> CatalogOutcome {
        if self.offline {
            debug!("Catalog offline, serving sample document");
            return self.degrade();
        }

        let url = self.url_for(request);
        match self.fetch(&url).await {
            Ok(doc) => {
                debug!(url = %url, "Catalog document fetched");
                CatalogOutcome::Live(doc)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Catalog request failed, degrading");
                self.degrade()
            }
        }
    }
}
