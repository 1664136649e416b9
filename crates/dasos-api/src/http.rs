//! REST client for the academic analytics API.
//!
//! Non-2xx responses are errors, except 404 on a single-subject lookup which
//! is the not-found signal. `null` bodies and `null` list entries are dropped.

use std::time::Duration;

use async_trait::async_trait;
use dasos_common::{
    ApiStats, DasosError, EvaluationChange, FacultyChange, GlobalInsights, HistoricalRate,
    PerformanceCorrelation, Result, Subject, SubjectFilter, SubjectInsights,
};
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::gateway::{AcademicApi, QueryParams};

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| DasosError::Config(format!("Invalid API base URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(DasosError::Config(format!("API base URL cannot be a base: {}", base_url)));
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base })
    }

    /// Base path + percent-encoded segments + non-empty query parameters.
    pub fn endpoint(&self, segments: &[&str], params: &QueryParams) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        url
    }

    /// `Ok(None)` on 404.
    async fn send(&self, url: Url) -> Result<Option<Vec<u8>>> {
        debug!(url = %url, "GET");
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DasosError::Status { status: status.as_u16(), url: url.to_string() });
        }
        Ok(Some(resp.bytes().await?.to_vec()))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        match self.send(url.clone()).await? {
            Some(body) => Ok(serde_json::from_slice(&body)?),
            None => Err(DasosError::Status { status: 404, url: url.to_string() }),
        }
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let rows: Option<Vec<Option<T>>> = self.fetch(url.clone()).await?;
        let rows: Vec<T> = rows.unwrap_or_default().into_iter().flatten().collect();
        debug!(url = %url, count = rows.len(), "List fetched");
        Ok(rows)
    }
}

#[async_trait]
impl AcademicApi for HttpGateway {
    #[instrument(skip(self))]
    async fn list_subjects(&self, filter: &SubjectFilter) -> Result<Vec<Subject>> {
        let url = self.endpoint(&["subjects"], &QueryParams::from(filter));
        self.fetch_list(url).await
    }

    #[instrument(skip(self))]
    async fn get_subject(&self, code: &str, academic_year: Option<&str>) -> Result<Option<Subject>> {
        let params = QueryParams::new().opt("academic_year", academic_year);
        let url = self.endpoint(&["subjects", code], &params);
        match self.send(url.clone()).await? {
            Some(body) => {
                let subject: Option<Subject> = serde_json::from_slice(&body)?;
                if subject.is_none() {
                    debug!(url = %url, "Subject body was null");
                }
                Ok(subject)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn historical_rates(&self, code: &str, rate_type: Option<&str>) -> Result<Vec<HistoricalRate>> {
        let params = QueryParams::new().opt("rate_type", rate_type);
        let url = self.endpoint(&["subjects", code, "historical"], &params);
        self.fetch_list(url).await
    }

    #[instrument(skip(self))]
    async fn faculty_changes(&self, code: Option<&str>) -> Result<Vec<FacultyChange>> {
        let params = QueryParams::new().opt("subject_code", code);
        self.fetch_list(self.endpoint(&["faculty", "changes"], &params)).await
    }

    #[instrument(skip(self))]
    async fn evaluation_changes(&self, code: Option<&str>) -> Result<Vec<EvaluationChange>> {
        let params = QueryParams::new().opt("subject_code", code);
        self.fetch_list(self.endpoint(&["evaluation", "changes"], &params)).await
    }

    #[instrument(skip(self))]
    async fn correlations(&self, code: Option<&str>) -> Result<Vec<PerformanceCorrelation>> {
        let params = QueryParams::new().opt("subject_code", code);
        self.fetch_list(self.endpoint(&["correlations"], &params)).await
    }

    #[instrument(skip(self))]
    async fn subject_insights(
        &self,
        code: Option<&str>,
        analysis_id: Option<i64>,
    ) -> Result<Vec<SubjectInsights>> {
        let params = QueryParams::new()
            .opt("subject_code", code)
            .opt_num("analysis_id", analysis_id);
        self.fetch_list(self.endpoint(&["insights", "subjects"], &params)).await
    }

    #[instrument(skip(self))]
    async fn global_insights(&self) -> Result<GlobalInsights> {
        self.fetch(self.endpoint(&["insights", "global"], &QueryParams::new())).await
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<ApiStats> {
        self.fetch(self.endpoint(&["stats"], &QueryParams::new())).await
    }
}
